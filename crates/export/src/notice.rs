//! User-facing notices for the export flow.
//!
//! The host UI shows these as transient toast-style messages; nothing
//! here blocks. Fetch and serialization failures surface a generic
//! message, while validation problems echo their reasons back to the
//! user.

use serde::Serialize;

use crate::pipeline::{ExportError, ExportOutcome};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// The notice to show for a finished export.
    pub fn for_outcome(outcome: &ExportOutcome) -> Self {
        match outcome {
            ExportOutcome::Completed { row_count, .. } => {
                Self::success(format!("Successfully exported {row_count} history events"))
            }
            ExportOutcome::NothingFound => {
                Self::info("No history events found for the selected filters")
            }
        }
    }

    /// The notice to show for a failed export.
    pub fn for_error(error: &ExportError) -> Self {
        match error {
            ExportError::Validation(reasons) => Self::error(reasons.join("; ")),
            ExportError::Api(_) | ExportError::Sheet(_) => {
                Self::error("History export failed. Please try again.")
            }
        }
    }
}
