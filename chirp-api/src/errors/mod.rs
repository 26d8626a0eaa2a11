use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chirp_commons::data_structures::ActionResult;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to create post. Please try again.")]
    CreatePost { source: DbErr },

    #[error("Failed to create comment. Please try again.")]
    CreateComment { source: DbErr },

    #[error("Failed to toggle like. Please try again.")]
    ToggleLike { source: DbErr },

    #[error("Not found")]
    NotFound,

    #[error("Database error")]
    Database {
        #[from]
        source: DbErr,
    },

    #[error("Page rendering error")]
    Render {
        #[from]
        source: tera::Error,
    },
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::CreatePost { .. }
            | ServiceError::CreateComment { .. }
            | ServiceError::ToggleLike { .. }
            | ServiceError::Database { .. }
            | ServiceError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ActionResult::<()>::failure(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_failures_keep_the_user_message() {
        let err = ServiceError::ToggleLike {
            source: DbErr::Custom("UNIQUE constraint failed".to_owned()),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to toggle like. Please try again.");

        let err = ServiceError::Validation("Author ID is missing.".to_owned());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Author ID is missing.");
    }
}
