use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::customer::CustomerId;
use crate::models::driver::DriverId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("location {0} already exists")]
    DuplicateLocation(String),

    #[error("no drivers available")]
    NoDriverAvailable,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("driver {0} not found")]
    DriverNotFound(DriverId),

    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::UnknownLocation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateLocation(_) | AppError::InvalidStateTransition(_) => {
                StatusCode::CONFLICT
            }
            AppError::NoDriverAvailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            AppError::CustomerNotFound(_) | AppError::DriverNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
