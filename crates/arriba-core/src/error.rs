//! Error type shared by every vendor client implementation

use thiserror::Error;

/// Result type for vendor operations
pub type VendorResult<T> = Result<T, VendorError>;

/// Errors that can occur while talking to the vendor portal.
///
/// Every failure mode of a vendor call funnels into one of these variants,
/// each of which carries a numeric status code for the HTTP surface.
#[derive(Debug, Clone, Error)]
pub enum VendorError {
    /// Vendor answered with a non-2xx status
    #[error("{message}")]
    Upstream {
        /// HTTP status returned by the vendor
        status: u16,
        /// Human-readable error message
        message: String,
    },

    /// Vendor answered 2xx but the resource body was empty
    #[error("{0}")]
    NotFound(String),

    /// Vendor answered 2xx with a body that does not match the expected shape
    #[error("{0}")]
    InvalidResponse(String),

    /// Network failure (DNS, connect, reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Transport timeout
    #[error("{0}")]
    Timeout(String),

    /// Internal error (request construction, URL building)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VendorError {
    /// Create an upstream error from a vendor status code and message
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Returns the status code for this error.
    ///
    /// Upstream errors keep the vendor's status. Transport failures map to
    /// fixed sentinels: 408 for timeouts, 503 for network failures.
    pub fn status_code(&self) -> u16 {
        match self {
            VendorError::Upstream { status, .. } => *status,
            VendorError::NotFound(_) => 404,
            VendorError::InvalidResponse(_) => 500,
            VendorError::Network(_) => 503,
            VendorError::Timeout(_) => 408,
            VendorError::Internal(_) => 500,
        }
    }
}
