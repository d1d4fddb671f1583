//! Shared data models for the portal wrapper

mod auth;
mod radio;
mod site;

pub use auth::*;
pub use radio::*;
pub use site::*;
