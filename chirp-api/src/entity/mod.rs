pub mod prelude;

pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;
