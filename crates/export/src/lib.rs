//! The LG lifecycle history export pipeline.
//!
//! Orchestrates one export invocation end to end: validate the user's
//! selection, fetch records and history from the portal, merge them into
//! flattened rows, serialize to an `.xlsx` workbook, and produce the
//! user-facing notice. The fetch seam is the [`LgPortal`] trait so the
//! flow is testable without a live backend.

pub mod notice;
pub mod pipeline;
pub mod sheet;

pub use notice::{Notice, NoticeLevel};
pub use pipeline::{run_export, ExportError, ExportOutcome, LgPortal};
pub use sheet::{export_filename, write_workbook, ExportFile, SheetError};
