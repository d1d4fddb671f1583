//! arriba-core - Core traits and types for the Instant On portal wrapper
//!
//! This crate provides the entities (sites, devices, radios, credentials),
//! the vendor status vocabulary, and the seams that let the aggregation
//! layer and the HTTP surface work against any vendor client implementation.

pub mod client;
pub mod error;
pub mod models;
pub mod token_store;

pub use client::VendorClient;
pub use error::{VendorError, VendorResult};
pub use models::*;
pub use token_store::{InMemoryTokenStore, TokenStore};
