pub use super::comments::Entity as Comments;
pub use super::likes::Entity as Likes;
pub use super::posts::Entity as Posts;
pub use super::users::Entity as Users;
