use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use palliate_calculators::error::CalculatorError;
use palliate_core::error::CoreError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unprocessable(String),
    NotImplemented(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotImplemented(msg) => (StatusCode::NOT_IMPLEMENTED, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CalculatorError> for ApiError {
    fn from(e: CalculatorError) -> Self {
        let message = e.to_string();
        match e {
            CalculatorError::UnknownCalculator(_) | CalculatorError::ConversionNotFound { .. } => {
                ApiError::NotFound(message)
            }
            CalculatorError::InputMismatch { .. } => ApiError::BadRequest(message),
            CalculatorError::Validation(_)
            | CalculatorError::UnknownDrug { .. }
            | CalculatorError::InvalidDose(_)
            | CalculatorError::InvalidPainScore(_) => ApiError::Unprocessable(message),
            CalculatorError::NotImplemented(_) => ApiError::NotImplemented(message),
            CalculatorError::InvalidConfig { .. }
            | CalculatorError::InvalidRecord { .. }
            | CalculatorError::DuplicateSlug(_) => ApiError::Internal(message),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
