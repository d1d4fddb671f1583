//! API error types and conversions

use arriba_core::VendorError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 401 Unauthorized (no usable bearer credential)
    Unauthorized,
    /// A vendor failure, tagged with the operation's error code
    Service {
        code: &'static str,
        source: VendorError,
    },
}

impl ApiError {
    /// Wrap a vendor error with an operation error code
    pub fn service(code: &'static str) -> impl FnOnce(VendorError) -> ApiError {
        move |source| ApiError::Service { code, source }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error codes reported in the `code` field of error bodies
pub mod codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const AUTH_FAILED: &str = "AUTH_FAILED";
    pub const REFRESH_FAILED: &str = "REFRESH_FAILED";
    pub const FETCH_FAILED: &str = "FETCH_FAILED";
    pub const TOGGLE_FAILED: &str = "TOGGLE_FAILED";
    pub const UPDATE_FAILED: &str = "UPDATE_FAILED";
}

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, codes::INVALID_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                codes::UNAUTHORIZED,
                "Access token required".to_string(),
            ),
            ApiError::Service { code, source } => {
                let status = StatusCode::from_u16(source.status_code())
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, code, source.to_string())
            }
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(code, status = status.as_u16(), %message, "API error");
        } else {
            tracing::debug!(code, status = status.as_u16(), %message, "API client error");
        }

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
