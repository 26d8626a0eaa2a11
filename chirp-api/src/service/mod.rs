pub mod comments;
pub mod feed;
mod helpers;
pub mod likes;
mod objects;
pub mod posts;

use crate::errors::ServiceError;
use actix_web::HttpResponse;
pub use objects::{DbConnection, Viewer};

pub type ServiceResult = Result<HttpResponse, ServiceError>;
