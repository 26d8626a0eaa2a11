//! Client side shadow state of the feed widgets.
//!
//! None of this is reconciled against the server beyond the success or
//! failure of the action that changed it. The server renders the initial
//! widgets from these models and the inline page script follows the same
//! transitions in the browser.

use chrono::{DateTime, Datelike, Utc};

use crate::data_structures::{ActionResult, PostData};

pub const CHARACTER_LIMIT: usize = 280;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PostCardState {
    pub liked: bool,
    pub likes_count: u64,
    pub show_comments: bool,
}

impl PostCardState {
    pub fn new(post: &PostData, viewer_id: Option<&str>) -> Self {
        Self {
            liked: viewer_id.map_or(false, |id| post.liked_by(id)),
            likes_count: post.likes.len() as u64,
            show_comments: false,
        }
    }

    /// Mirrors the outcome of a like toggle. A failed toggle leaves the card
    /// untouched and hands back the message to show.
    pub fn apply_like_result<T>(&mut self, result: &ActionResult<T>) -> Result<(), String> {
        if !result.success {
            return Err(result
                .error
                .clone()
                .unwrap_or_else(|| "Failed to toggle like. Please try again.".to_owned()));
        }
        let liked = result.liked.unwrap_or(false);
        self.liked = liked;
        self.likes_count = if liked {
            self.likes_count + 1
        } else {
            self.likes_count.saturating_sub(1)
        };
        Ok(())
    }

    pub fn toggle_comments(&mut self) {
        self.show_comments = !self.show_comments;
    }

    pub fn on_comment_posted<T>(&mut self, result: &ActionResult<T>) {
        if result.success {
            self.show_comments = true;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreatePostFormState {
    pub content: String,
    pub focused: bool,
}

impl CreatePostFormState {
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn remaining_chars(&self) -> i64 {
        CHARACTER_LIMIT as i64 - self.content.chars().count() as i64
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining_chars() < 0
    }

    /// Whether the media bar and counter are visible.
    pub fn show_toolbar(&self) -> bool {
        self.focused || !self.content.is_empty()
    }

    /// Fill of the countdown ring, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        let used = self.content.chars().count() as f64;
        (used / CHARACTER_LIMIT as f64 * 100.0).min(100.0)
    }

    pub fn can_submit(&self, pending: bool) -> bool {
        !pending && !self.content.trim().is_empty() && !self.is_over_limit()
    }

    pub fn on_result<T>(&mut self, result: &ActionResult<T>) {
        if result.success {
            self.content.clear();
            self.focused = false;
        }
    }
}

pub fn display_name(name: Option<&str>) -> &str {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => "Anonymous",
    }
}

pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// `@handle` shown next to the author name.
pub fn handle(name: Option<&str>) -> String {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => "anonymous",
    };
    name.to_lowercase().replacen(' ', "", 1)
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}

/// Relative time under a day, a short calendar date otherwise.
pub fn format_time(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(created);
    let seconds = delta.num_milliseconds().abs() as f64 / 1000.0;

    if seconds < 24.0 * 60.0 * 60.0 {
        let distance = if seconds < 60.0 {
            plural(seconds.round() as i64, "second")
        } else if seconds < 60.0 * 60.0 {
            plural((seconds / 60.0).round() as i64, "minute")
        } else {
            plural((seconds / 3600.0).round() as i64, "hour")
        };
        if delta.num_milliseconds() >= 0 {
            format!("{distance} ago")
        } else {
            format!("in {distance}")
        }
    } else if created.year() != now.year() {
        created.format("%b %-d, %Y").to_string()
    } else {
        created.format("%b %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::{LikeData, UserData};
    use chrono::TimeZone;

    fn post_with_likes(likers: &[&str]) -> PostData {
        PostData {
            id: "p1".to_owned(),
            author: UserData::default(),
            created_at: Utc::now(),
            content: "hello".to_owned(),
            comments: vec![],
            likes: likers
                .iter()
                .map(|u| LikeData {
                    user_id: u.to_string(),
                    post_id: "p1".to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn card_starts_from_viewer_likes() {
        let post = post_with_likes(&["bob", "alice"]);
        let state = PostCardState::new(&post, Some("alice"));
        assert!(state.liked);
        assert_eq!(state.likes_count, 2);
        assert!(!state.show_comments);

        assert!(!PostCardState::new(&post, Some("carol")).liked);
        assert!(!PostCardState::new(&post, None).liked);
    }

    #[test]
    fn double_toggle_restores_card() {
        let post = post_with_likes(&["bob"]);
        let mut state = PostCardState::new(&post, Some("alice"));
        let original = state.clone();

        state.apply_like_result(&ActionResult::<()>::liked(true)).unwrap();
        assert!(state.liked);
        assert_eq!(state.likes_count, 2);

        state.apply_like_result(&ActionResult::<()>::liked(false)).unwrap();
        assert_eq!(state, original);
    }

    #[test]
    fn failed_toggle_keeps_state_and_reports() {
        let mut state = PostCardState::new(&post_with_likes(&[]), Some("alice"));
        let err = state
            .apply_like_result(&ActionResult::<()>::failure("boom"))
            .unwrap_err();
        assert_eq!(err, "boom");
        assert_eq!(state.likes_count, 0);
        assert!(!state.liked);
    }

    #[test]
    fn comment_panel_opens_after_posting() {
        let mut state = PostCardState::new(&post_with_likes(&[]), None);
        state.on_comment_posted(&ActionResult::<()>::failure("x"));
        assert!(!state.show_comments);
        state.on_comment_posted(&ActionResult::<()>::ok());
        assert!(state.show_comments);
        state.toggle_comments();
        assert!(!state.show_comments);
    }

    #[test]
    fn countdown_and_submit_rules() {
        let mut form = CreatePostFormState::default();
        assert!(!form.show_toolbar());
        assert!(!form.can_submit(false));

        form.set_content("   ");
        assert!(form.show_toolbar());
        assert!(!form.can_submit(false));

        form.set_content("hello");
        assert_eq!(form.remaining_chars(), 275);
        assert!(form.can_submit(false));
        assert!(!form.can_submit(true));

        form.set_content("x".repeat(CHARACTER_LIMIT + 1));
        assert_eq!(form.remaining_chars(), -1);
        assert!(form.is_over_limit());
        assert!(!form.can_submit(false));
        assert_eq!(form.progress_percent(), 100.0);

        form.focus();
        form.on_result(&ActionResult::<()>::ok());
        assert_eq!(form, CreatePostFormState::default());
    }

    #[test]
    fn names_and_handles() {
        assert_eq!(initials("Alice Liddell"), "AL");
        assert_eq!(initials("bob"), "B");
        assert_eq!(initials(""), "");
        assert_eq!(display_name(None), "Anonymous");
        assert_eq!(display_name(Some("")), "Anonymous");
        assert_eq!(handle(Some("Mary Ann Lee")), "maryann lee");
        assert_eq!(handle(None), "anonymous");
    }

    #[test]
    fn time_labels() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let at = |h, m, s| Utc.with_ymd_and_hms(2024, 3, 10, h, m, s).unwrap();

        assert_eq!(format_time(at(11, 59, 30), now), "30 seconds ago");
        assert_eq!(format_time(at(11, 59, 0), now), "1 minute ago");
        assert_eq!(format_time(at(9, 0, 0), now), "3 hours ago");
        assert_eq!(format_time(at(12, 5, 0), now), "in 5 minutes");

        let older = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        assert_eq!(format_time(older, now), "Mar 4");
        let last_year = Utc.with_ymd_and_hms(2023, 12, 25, 8, 0, 0).unwrap();
        assert_eq!(format_time(last_year, now), "Dec 25, 2023");
    }
}
