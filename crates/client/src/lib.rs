//! REST client for the LG portal backend.
//!
//! Provides typed fetchers for LG summary records and lifecycle history
//! events, response-shape normalization for the inconsistent record-list
//! payload, query-parameter assembly, and environment-based
//! configuration.

pub mod api;
pub mod config;
pub mod query;
pub mod response;

pub use api::{LgApiError, LgPortalApi};
pub use config::PortalConfig;
