//! Domain core for the LG lifecycle history export pipeline.
//!
//! This crate holds the pure, I/O-free parts of the export flow: the
//! action-type taxonomy and filter groups, the record/event data model,
//! structured-details extraction, the merge & projection engine that
//! flattens history events into export rows, and export-request
//! validation. Fetching and serialization live in the `lgflow-client`
//! and `lgflow-export` crates.

pub mod actions;
pub mod details;
pub mod merge;
pub mod model;
pub mod request;
pub mod types;
