//! arriba-service - Aggregation over the vendor client
//!
//! Composes vendor calls into the shapes the browser UI consumes, merging
//! radio lists into devices and devices into sites.

mod portal;

pub use portal::PortalService;
