//! Authentication models

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Token type reported for every credential issued by the portal
pub const BEARER: &str = "Bearer";

/// Credentials are reported expired this many seconds before their actual expiry
const EXPIRY_SKEW_SECS: i64 = 5 * 60;

/// Lifetime in days assumed for a credential reconstructed from a request header
const CARRIED_TOKEN_LIFETIME_DAYS: i64 = 365;

/// Login credentials submitted by the browser
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token grant returned by the vendor's login and refresh endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// A bearer credential used to authorize outbound vendor calls.
///
/// Credentials are replaced on refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
}

impl Credential {
    /// Build a credential from a vendor token grant received at `now`
    pub fn issued(grant: LoginResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: now + Duration::seconds(grant.expires_in),
            token_type: grant.token_type,
        }
    }

    /// Build a credential carrying only an access token.
    ///
    /// The real expiry is not transmitted by the browser, so a long window
    /// is assumed; the vendor remains the authority on token validity.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: Utc::now() + Duration::days(CARRIED_TOKEN_LIFETIME_DAYS),
            token_type: BEARER.to_string(),
        }
    }

    /// Whether the credential is expired (or about to expire) at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Portal account information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
}
