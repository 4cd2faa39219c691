use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use video_core::{StoreError, ValidationErrors};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Body that could not be read as a JSON object
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Single-message error body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let code = self.status_code();
        match self {
            AppError::NotFound(msg) => HttpResponse::build(code).json(MessageResponse {
                message: msg.clone(),
            }),
            AppError::Validation(errors) => HttpResponse::build(code).json(errors),
            AppError::BadRequest(msg) => {
                let mut errors = ValidationErrors::new();
                errors.push("body", msg.clone());
                HttpResponse::build(code).json(errors)
            }
            AppError::Config(_) => HttpResponse::build(code).json(MessageResponse {
                message: self.to_string(),
            }),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::not_found(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound("Video not found".to_string())
    }
}
