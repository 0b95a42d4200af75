use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("username {0} is already taken")]
    Conflict(String),

    #[error("invalid credentials or no active session")]
    Forbidden,

    #[error("malformed object id: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("serialization error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Session(_) | AppError::Hash(_) | AppError::Bson(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(
            AppError::Conflict(String::from("alice")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InvalidId(String::from("nope")).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
