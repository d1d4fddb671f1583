//! Bearer credential extraction
//!
//! The browser carries the access token in `Authorization: Bearer <token>`.
//! Only the access token travels with the request; the refresh token and
//! real expiry stay on the client side.

use arriba_core::Credential;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::ApiError;

const SCHEME: &str = "bearer ";

/// Build a credential from the request's `Authorization` header.
///
/// Returns `None` when the header is absent, uses another scheme, or carries
/// an empty token.
pub fn credential_from_header(headers: &HeaderMap) -> Option<Credential> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let prefix = value.get(..SCHEME.len())?;
    if !prefix.eq_ignore_ascii_case(SCHEME) {
        return None;
    }

    let token = value[SCHEME.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(Credential::bearer(token))
}

/// Extractor for routes that need a vendor credential; rejects with 401
#[derive(Debug, Clone)]
pub struct BearerCredential(pub Credential);

impl<S> FromRequestParts<S> for BearerCredential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match credential_from_header(&parts.headers) {
            Some(credential) => Ok(BearerCredential(credential)),
            None => {
                tracing::warn!(path = %parts.uri.path(), "Unauthorized - no access token provided");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
