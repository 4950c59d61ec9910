//! Export orchestration.
//!
//! One call to [`run_export`] performs one export invocation: validate
//! the selection, fetch records and history, merge, serialize. The two
//! fetches are independent, so they are issued concurrently and joined;
//! failure semantics are unchanged (the first error aborts the attempt,
//! no retries, no partial file).

use chrono::NaiveDate;

use lgflow_client::{LgApiError, LgPortalApi};
use lgflow_core::actions::{action_types_for_groups, covers_all_action_types};
use lgflow_core::merge::build_export_rows;
use lgflow_core::model::{HistoryEvent, LgRecordSummary};
use lgflow_core::request::ExportRequest;
use lgflow_core::types::RecordId;

use crate::sheet::{export_filename, write_workbook, ExportFile, SheetError};

// ---------------------------------------------------------------------------
// Fetch seam
// ---------------------------------------------------------------------------

/// The portal fetch operations the pipeline depends on.
///
/// Implemented by [`LgPortalApi`] for production and by in-test mocks.
pub trait LgPortal {
    /// Fetch LG summary records, optionally restricted to `ids`.
    fn fetch_lg_records(
        &self,
        ids: Option<&[RecordId]>,
    ) -> impl std::future::Future<Output = Result<Vec<LgRecordSummary>, LgApiError>> + Send;

    /// Fetch lifecycle history events for the inclusive date range.
    fn fetch_lifecycle_history(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        action_types: Option<&[&str]>,
        ids: Option<&[RecordId]>,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryEvent>, LgApiError>> + Send;
}

impl LgPortal for LgPortalApi {
    async fn fetch_lg_records(
        &self,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<LgRecordSummary>, LgApiError> {
        LgPortalApi::fetch_lg_records(self, ids).await
    }

    async fn fetch_lifecycle_history(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        action_types: Option<&[&str]>,
        ids: Option<&[RecordId]>,
    ) -> Result<Vec<HistoryEvent>, LgApiError> {
        LgPortalApi::fetch_lifecycle_history(self, start_date, end_date, action_types, ids).await
    }
}

// ---------------------------------------------------------------------------
// Outcome and errors
// ---------------------------------------------------------------------------

/// Result of a successful export invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The workbook was produced.
    Completed {
        file: ExportFile,
        /// Number of history events exported.
        row_count: usize,
    },
    /// The date range and filters matched no history events; no file was
    /// produced. Informational, not an error.
    NothingFound,
}

/// Errors that abort an export attempt.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The selection failed validation; no fetch was issued.
    #[error("Invalid export request: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A portal fetch failed.
    #[error(transparent)]
    Api(#[from] LgApiError),

    /// Workbook serialization failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run one export invocation.
///
/// `today` is the calendar date embedded in the output filename; the
/// host passes the current date.
pub async fn run_export<P: LgPortal>(
    portal: &P,
    request: &ExportRequest,
    today: NaiveDate,
) -> Result<ExportOutcome, ExportError> {
    let errors = request.validate();
    if !errors.is_empty() {
        return Err(ExportError::Validation(errors));
    }

    let group_keys = request.group_keys();
    // When the selection spans every known action type the filter is
    // omitted entirely and the portal returns all events.
    let action_filter = if covers_all_action_types(&group_keys) {
        None
    } else {
        Some(action_types_for_groups(&group_keys))
    };

    let ids = request.record_ids.as_deref();
    tracing::info!(
        start = %request.start_date,
        end = %request.end_date,
        groups = ?request.groups,
        filtered_ids = ?ids.map(|i| i.len()),
        "Starting history export",
    );

    let (records, events) = tokio::join!(
        portal.fetch_lg_records(ids),
        portal.fetch_lifecycle_history(
            request.start_date,
            request.end_date,
            action_filter.as_deref(),
            ids,
        ),
    );
    let records = records?;
    let events = events?;

    if events.is_empty() {
        tracing::info!("No history events matched the export filters");
        return Ok(ExportOutcome::NothingFound);
    }

    let rows = build_export_rows(&records, &events);
    let bytes = write_workbook(&rows)?;

    let file = ExportFile {
        name: export_filename(today),
        bytes,
    };
    tracing::info!(rows = rows.len(), file = %file.name, "History export complete");

    Ok(ExportOutcome::Completed {
        row_count: rows.len(),
        file,
    })
}
