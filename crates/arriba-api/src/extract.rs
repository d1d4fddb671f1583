//! Request extractors that reject with [`ApiError`]
//!
//! Axum's stock `Json` and `Query` reject with plain-text bodies and 415/422
//! statuses. These wrappers route every rejection through `ApiError` so the
//! client always gets a 400 `{code, message}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
