use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing name, email, or image.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing name, email, or image.")]
    MissingFields,

    #[error("Malformed form payload: {0}")]
    MalformedPayload(#[from] MultipartError),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFields => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            // 413 when the body limit was hit, 400 otherwise.
            AppError::MalformedPayload(ref e) => (e.status(), self.to_string()).into_response(),
            AppError::Storage(_) | AppError::Database(_) | AppError::Template(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while handling the submission.",
                )
                    .into_response()
            }
        }
    }
}
