//! HTTP handlers for the portal API

pub mod app;
pub mod auth;
pub mod radios;
pub mod sites;
