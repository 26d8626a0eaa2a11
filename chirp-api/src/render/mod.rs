//! Server side rendering of the feed pages.
//!
//! Templates are compiled into the binary; every page extends `layout.html`
//! which carries the header and both sidebars.

use chirp_commons::data_structures::{CommentData, PostData, UserData};
use chirp_commons::view_state::{
    display_name, format_time, handle, initials, CreatePostFormState, PostCardState,
    CHARACTER_LIMIT,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Serialize)]
struct ViewerView {
    id: String,
    name: String,
    initials: String,
    handle: String,
}

impl From<&UserData> for ViewerView {
    fn from(user: &UserData) -> Self {
        let name = display_name(user.name.as_deref());
        Self {
            id: user.id.clone(),
            initials: initials(name),
            handle: handle(user.name.as_deref()),
            name: name.to_owned(),
        }
    }
}

#[derive(Serialize)]
struct CommentView {
    author_name: String,
    author_initials: String,
    author_handle: String,
    time_label: String,
    content: String,
}

#[derive(Serialize)]
struct PostCardView {
    id: String,
    author_name: String,
    author_initials: String,
    author_handle: String,
    time_label: String,
    content: String,
    comment_count: usize,
    state: PostCardState,
    comments: Vec<CommentView>,
}

impl PostCardView {
    fn new(post: &PostData, viewer: Option<&UserData>, now: DateTime<Utc>, expanded: bool) -> Self {
        let author_name = display_name(post.author.name.as_deref());
        let mut state = PostCardState::new(post, viewer.map(|v| v.id.as_str()));
        if expanded {
            state.toggle_comments();
        }
        Self {
            id: post.id.clone(),
            author_initials: initials(author_name),
            author_handle: handle(post.author.name.as_deref()),
            author_name: author_name.to_owned(),
            time_label: format_time(post.created_at, now),
            content: post.content.clone(),
            comment_count: post.comments.len(),
            state,
            comments: post
                .comments
                .iter()
                .map(|c: &CommentData| {
                    let name = display_name(c.author.name.as_deref());
                    CommentView {
                        author_name: name.to_owned(),
                        author_initials: initials(name),
                        author_handle: handle(c.author.name.as_deref()),
                        time_label: format_time(c.created_at, now),
                        content: c.content.clone(),
                    }
                })
                .collect(),
        }
    }
}

/// Initial look of the create-post form; the page script keeps it current
/// while typing.
#[derive(Serialize)]
struct PostFormView {
    remaining: i64,
    over_limit: bool,
    show_toolbar: bool,
    progress_percent: f64,
    can_submit: bool,
}

impl From<&CreatePostFormState> for PostFormView {
    fn from(state: &CreatePostFormState) -> Self {
        Self {
            remaining: state.remaining_chars(),
            over_limit: state.is_over_limit(),
            show_toolbar: state.show_toolbar(),
            progress_percent: state.progress_percent(),
            can_submit: state.can_submit(false),
        }
    }
}

#[derive(Serialize)]
struct Topic {
    category: &'static str,
    tag: &'static str,
    posts: &'static str,
    trend: &'static str,
}

#[derive(Serialize)]
struct SuggestedUser {
    name: &'static str,
    initials: String,
    handle: &'static str,
    bio: &'static str,
    followers: &'static str,
    verified: bool,
}

#[derive(Serialize)]
struct Event {
    title: &'static str,
    date: &'static str,
    attendees: &'static str,
    kind: &'static str,
}

const TOPICS: [(&str, &str, &str, &str); 5] = [
    ("Technology", "#WebDevelopment", "12.5K posts", "+15%"),
    ("Programming", "#Rust", "8.2K posts", "+8%"),
    ("Development", "#Actix", "15.3K posts", "+22%"),
    ("Backend", "#SeaORM", "25.1K posts", "+5%"),
    ("Web", "#ServerRendering", "6.8K posts", "+12%"),
];

const SUGGESTED: [(&str, &str, &str, &str, bool); 3] = [
    ("Sarah Chen", "@sarahdev", "Full-stack developer", "12.5K", true),
    ("Alex Rodriguez", "@alexcodes", "Open source contributor", "8.2K", false),
    ("Maya Patel", "@mayatech", "UI/UX Designer & Frontend Developer", "15.3K", true),
];

const EVENTS: [(&str, &str, &str, &str); 3] = [
    ("Rust Conference", "Dec 15", "2.5K", "Virtual"),
    ("Web Meetup", "Dec 20", "150", "In-person"),
    ("Async Workshop", "Dec 22", "500", "Virtual"),
];

pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("templates/layout.html")),
            ("header.html", include_str!("templates/header.html")),
            ("sidebars.html", include_str!("templates/sidebars.html")),
            ("create_post_form.html", include_str!("templates/create_post_form.html")),
            ("post_card.html", include_str!("templates/post_card.html")),
            ("feed.html", include_str!("templates/feed.html")),
            ("post.html", include_str!("templates/post.html")),
        ])?;
        Ok(Self { tera })
    }

    fn base_context(&self, viewer: Option<&UserData>) -> Context {
        let mut ctx = Context::new();
        ctx.insert("viewer", &viewer.map(ViewerView::from));
        ctx.insert("character_limit", &CHARACTER_LIMIT);
        ctx.insert(
            "post_form",
            &PostFormView::from(&CreatePostFormState::default()),
        );
        ctx.insert(
            "topics",
            &TOPICS
                .iter()
                .map(|&(category, tag, posts, trend)| Topic {
                    category,
                    tag,
                    posts,
                    trend,
                })
                .collect::<Vec<_>>(),
        );
        ctx.insert(
            "suggested",
            &SUGGESTED
                .iter()
                .map(|&(name, handle, bio, followers, verified)| SuggestedUser {
                    name,
                    initials: initials(name),
                    handle,
                    bio,
                    followers,
                    verified,
                })
                .collect::<Vec<_>>(),
        );
        ctx.insert(
            "events",
            &EVENTS
                .iter()
                .map(|&(title, date, attendees, kind)| Event {
                    title,
                    date,
                    attendees,
                    kind,
                })
                .collect::<Vec<_>>(),
        );
        ctx
    }

    pub fn feed_page(
        &self,
        posts: &[PostData],
        viewer: Option<&UserData>,
        now: DateTime<Utc>,
    ) -> Result<String, tera::Error> {
        let mut ctx = self.base_context(viewer);
        ctx.insert("title", "Home");
        ctx.insert(
            "posts",
            &posts
                .iter()
                .map(|p| PostCardView::new(p, viewer, now, false))
                .collect::<Vec<_>>(),
        );
        self.tera.render("feed.html", &ctx)
    }

    pub fn post_page(
        &self,
        post: &PostData,
        viewer: Option<&UserData>,
        now: DateTime<Utc>,
    ) -> Result<String, tera::Error> {
        let mut ctx = self.base_context(viewer);
        ctx.insert("title", "Post");
        ctx.insert("post", &PostCardView::new(post, viewer, now, true));
        self.tera.render("post.html", &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_commons::data_structures::LikeData;

    fn user(id: &str, name: &str) -> UserData {
        UserData {
            id: id.to_owned(),
            name: Some(name.to_owned()),
            email: format!("{id}@example.com"),
        }
    }

    fn post() -> PostData {
        let now = Utc::now();
        PostData {
            id: "p1".to_owned(),
            author: user("bob", "Bob Builder"),
            created_at: now,
            content: "<script>alert(1)</script> hello".to_owned(),
            comments: vec![CommentData {
                id: "c1".to_owned(),
                post_id: "p1".to_owned(),
                author: user("alice", "Alice"),
                created_at: now,
                content: "first!".to_owned(),
            }],
            likes: vec![LikeData {
                user_id: "alice".to_owned(),
                post_id: "p1".to_owned(),
            }],
        }
    }

    #[test]
    fn empty_feed_shows_placeholder() {
        let renderer = Renderer::new().unwrap();
        let page = renderer.feed_page(&[], None, Utc::now()).unwrap();
        assert!(page.contains("No posts yet"));
        assert!(page.contains("What&#x27;s happening?") || page.contains("What's happening?"));
    }

    #[test]
    fn post_content_is_escaped() {
        let renderer = Renderer::new().unwrap();
        let page = renderer.feed_page(&[post()], None, Utc::now()).unwrap();
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("@bobbuilder"));
        assert!(!page.contains("No posts yet"));
    }

    #[test]
    fn viewer_like_marks_the_heart() {
        let renderer = Renderer::new().unwrap();
        let alice = user("alice", "Alice");
        let page = renderer
            .feed_page(&[post()], Some(&alice), Utc::now())
            .unwrap();
        assert!(page.contains("like-button liked"));
        assert!(page.contains(r#"name="userId" value="alice""#));

        let carol = user("carol", "Carol");
        let page = renderer
            .feed_page(&[post()], Some(&carol), Utc::now())
            .unwrap();
        assert!(!page.contains("like-button liked"));
    }

    #[test]
    fn post_page_expands_comments() {
        let renderer = Renderer::new().unwrap();
        let page = renderer.post_page(&post(), None, Utc::now()).unwrap();
        assert!(page.contains("first!"));
        assert!(page.contains(r#"class="comments open""#));
        assert!(page.contains("@alice ·"));
    }

    #[test]
    fn post_form_starts_empty_and_locked() {
        let renderer = Renderer::new().unwrap();
        let alice = user("alice", "Alice");
        let page = renderer.feed_page(&[], Some(&alice), Utc::now()).unwrap();
        assert!(page.contains(r#"<span id="remaining-chars" class="muted">280</span>"#));
        assert!(page.contains(r#"<progress id="post-progress" max="100""#));
        assert!(page.contains(r#"<div id="post-toolbar" hidden>"#));
        assert!(page.contains(r#"<button id="post-submit" type="submit" disabled>"#));
    }
}
