//! Error handling
//!
//! Maps core pipeline errors onto HTTP responses. Every error body is a
//! structured `{success: false, error, status}` object; a failed request
//! never carries a partial or guessed score.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use exohabitat_core::ranking::StoreError;
use exohabitat_core::{PredictError, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Input errors
    Validation(String),
    InvalidPhysics(String),

    // Resource errors
    AlreadyExists(String),

    // Serving errors
    ModelNotLoaded,
    SchemaMismatch(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidPhysics(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ModelNotLoaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "no model artifact loaded".to_string(),
            ),
            AppError::SchemaMismatch(msg) => {
                tracing::error!("schema mismatch: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "model/feature schema mismatch".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Validation(e) => AppError::Validation(e.to_string()),
            PredictError::Feature(e) => AppError::InvalidPhysics(e.to_string()),
            PredictError::SchemaMismatch(msg) => AppError::SchemaMismatch(msg),
            PredictError::NoModelLoaded => AppError::ModelNotLoaded,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(name) => {
                AppError::AlreadyExists(format!("planet \"{name}\" already exists"))
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}
