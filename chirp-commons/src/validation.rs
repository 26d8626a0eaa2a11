use validator::{Validate, ValidationError, ValidationErrors};

use crate::data_structures::{
    CommentCreationData, LikeToggleData, PostCreationData, COMMENT_CONTENT_EMPTY,
    COMMENT_IDS_MISSING, LIKE_IDS_MISSING, POST_AUTHOR_MISSING, POST_CONTENT_EMPTY,
};

pub fn validate_post_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        Err(ValidationError::new("blank_post").with_message(POST_CONTENT_EMPTY.into()))
    } else {
        Ok(())
    }
}

pub fn validate_comment_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        Err(ValidationError::new("blank_comment").with_message(COMMENT_CONTENT_EMPTY.into()))
    } else {
        Ok(())
    }
}

/// Picks the message a failed form reports. Field errors come back unordered,
/// so the caller names the messages in the order they should win.
fn first_message(errors: &ValidationErrors, priority: &[&str]) -> String {
    let reported = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>();
    priority
        .iter()
        .find(|msg| reported.iter().any(|r| r.as_str() == **msg))
        .map(|msg| msg.to_string())
        .or_else(|| reported.into_iter().next())
        .unwrap_or_else(|| errors.to_string())
}

/// Form validation that collapses to the single message shown to the user.
pub trait CheckForm: Validate {
    const PRIORITY: &'static [&'static str];

    fn check(&self) -> Result<(), String> {
        self.validate()
            .map_err(|errors| first_message(&errors, Self::PRIORITY))
    }
}

impl CheckForm for PostCreationData {
    const PRIORITY: &'static [&'static str] = &[POST_CONTENT_EMPTY, POST_AUTHOR_MISSING];
}

impl CheckForm for CommentCreationData {
    const PRIORITY: &'static [&'static str] = &[COMMENT_CONTENT_EMPTY, COMMENT_IDS_MISSING];
}

impl CheckForm for LikeToggleData {
    const PRIORITY: &'static [&'static str] = &[LIKE_IDS_MISSING];
}
