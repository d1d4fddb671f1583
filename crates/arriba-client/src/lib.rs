//! Instant On client library
//!
//! Provides a typed HTTP client for the Aruba Instant On authentication and
//! device-management APIs, plus a stub client for local development.
//!
//! # Example
//!
//! ```rust,no_run
//! use arriba_client::InstantOnClient;
//! use arriba_core::{LoginRequest, VendorClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arriba_core::VendorError> {
//!     let client = InstantOnClient::new()?;
//!
//!     let grant = client
//!         .login(&LoginRequest::new("admin@example.com", "hunter2"))
//!         .await?;
//!     let sites = client.list_sites(&grant.access_token).await?;
//!
//!     for site in sites {
//!         println!("{} ({})", site.name, site.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module runs an axum router on an ephemeral port so the
//! client can be exercised against an in-process vendor stub:
//!
//! ```rust,ignore
//! use arriba_client::testing::TestServer;
//!
//! let server = TestServer::start(vendor_router).await?;
//! let client = server.vendor_client()?;
//! ```

mod client;
mod stub;
pub mod testing;
mod wire;

pub use client::{ClientConfig, InstantOnClient, DEFAULT_API_URL, DEFAULT_AUTH_URL};
pub use stub::{
    StubClient, STUB_ACCESS_TOKEN, STUB_EMAIL, STUB_PASSWORD, STUB_REFRESH_TOKEN,
};

// Re-export core types for convenience
pub use arriba_core::{VendorClient, VendorError, VendorResult};
