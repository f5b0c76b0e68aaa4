use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::domain::position::service::time_window_service::TimeWindowError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidQuery(#[from] TimeWindowError),

    #[error("Internal Server Error")]
    InternalServerError(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: std::fmt::Display>(err: E) -> AppError {
    AppError::InternalServerError(err.to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Choose status codes per variant
        let status = match self {
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };

        // Internal details stay in the logs; only the short message goes out
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
