#[cfg(feature = "backend")]
pub mod validation;
pub mod view_state;

pub mod data_structures {
    #[cfg(feature = "backend")]
    use validator::Validate;

    pub const POST_CONTENT_EMPTY: &str = "Post content cannot be empty.";
    pub const POST_AUTHOR_MISSING: &str = "Author ID is missing.";
    pub const COMMENT_CONTENT_EMPTY: &str = "Comment content cannot be empty.";
    pub const COMMENT_IDS_MISSING: &str = "Author ID or Post ID is missing.";
    pub const LIKE_IDS_MISSING: &str = "User ID or Post ID is missing.";

    #[derive(Clone, serde::Serialize, serde::Deserialize, Debug, Default)]
    #[cfg_attr(feature = "backend", derive(Validate))]
    pub struct PostCreationData {
        #[serde(default)]
        #[cfg_attr(feature = "backend",
            validate(custom(function = "crate::validation::validate_post_content")))]
        pub content: String,
        #[serde(default, rename = "authorId")]
        #[cfg_attr(feature = "backend",
            validate(length(min = 1, message = "Author ID is missing.")))]
        pub author_id: String,
    }

    #[derive(Clone, serde::Serialize, serde::Deserialize, Debug, Default)]
    #[cfg_attr(feature = "backend", derive(Validate))]
    pub struct CommentCreationData {
        #[serde(default)]
        #[cfg_attr(feature = "backend",
            validate(custom(function = "crate::validation::validate_comment_content")))]
        pub content: String,
        #[serde(default, rename = "authorId")]
        #[cfg_attr(feature = "backend",
            validate(length(min = 1, message = "Author ID or Post ID is missing.")))]
        pub author_id: String,
        #[serde(default, rename = "postId")]
        #[cfg_attr(feature = "backend",
            validate(length(min = 1, message = "Author ID or Post ID is missing.")))]
        pub post_id: String,
    }

    #[derive(Clone, serde::Serialize, serde::Deserialize, Debug, Default)]
    #[cfg_attr(feature = "backend", derive(Validate))]
    pub struct LikeToggleData {
        #[serde(default, rename = "userId")]
        #[cfg_attr(feature = "backend",
            validate(length(min = 1, message = "User ID or Post ID is missing.")))]
        pub user_id: String,
        #[serde(default, rename = "postId")]
        #[cfg_attr(feature = "backend",
            validate(length(min = 1, message = "User ID or Post ID is missing.")))]
        pub post_id: String,
    }

    #[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq, Default)]
    pub struct UserData {
        pub id: String,
        pub name: Option<String>,
        pub email: String,
    }

    #[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
    pub struct LikeData {
        pub user_id: String,
        pub post_id: String,
    }

    #[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
    pub struct CommentData {
        pub id: String,
        pub post_id: String,
        pub author: UserData,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub content: String,
    }

    /// A post together with everything the feed shows about it.
    #[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
    pub struct PostData {
        pub id: String,
        pub author: UserData,
        pub created_at: chrono::DateTime<chrono::Utc>,
        pub content: String,
        pub comments: Vec<CommentData>,
        pub likes: Vec<LikeData>,
    }

    impl PostData {
        pub fn liked_by(&self, user_id: &str) -> bool {
            self.likes.iter().any(|l| l.user_id == user_id)
        }
    }

    /// Reply of every mutation endpoint.
    ///
    /// Failures only ever carry a human readable `error`; successful like
    /// toggles report the new state in `liked`.
    #[derive(Clone, serde::Deserialize, serde::Serialize, Debug, PartialEq)]
    pub struct ActionResult<T = ()> {
        pub success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub liked: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub data: Option<T>,
    }

    impl<T> ActionResult<T> {
        pub fn ok() -> Self {
            Self {
                success: true,
                error: None,
                liked: None,
                data: None,
            }
        }
        pub fn with_data(data: T) -> Self {
            Self {
                data: Some(data),
                ..Self::ok()
            }
        }
        pub fn liked(liked: bool) -> Self {
            Self {
                liked: Some(liked),
                ..Self::ok()
            }
        }
        pub fn failure(error: impl Into<String>) -> Self {
            Self {
                success: false,
                error: Some(error.into()),
                liked: None,
                data: None,
            }
        }
    }
}
