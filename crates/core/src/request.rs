//! Export request definition and validation.
//!
//! One [`ExportRequest`] value captures everything the user selected on
//! the export form: the inclusive date range, the checked filter groups,
//! and the optional record-id restriction. A single request drives a
//! single export invocation; there is no shared form state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::actions::ALL_GROUPS;
use crate::types::RecordId;

/// Parameters of one export invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Inclusive start of the date range.
    pub start_date: NaiveDate,
    /// Inclusive end of the date range.
    pub end_date: NaiveDate,
    /// Selected filter groups (keys from [`crate::actions::groups`]).
    pub groups: Vec<String>,
    /// Restrict the export to these record ids; `None` exports all.
    #[serde(default)]
    pub record_ids: Option<Vec<RecordId>>,
}

impl ExportRequest {
    /// Validate the selection before any fetch is issued.
    ///
    /// Returns an empty `Vec` if valid; otherwise a list of
    /// human-readable errors.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.start_date > self.end_date {
            errors.push(format!(
                "Start date {} is after end date {}",
                self.start_date, self.end_date
            ));
        }

        if self.groups.is_empty() {
            errors.push("At least one action group must be selected".to_string());
        }

        for group in &self.groups {
            if !ALL_GROUPS.contains(&group.as_str()) {
                errors.push(format!("Unknown action group: {group}"));
            }
        }

        if let Some(ids) = &self.record_ids {
            if ids.is_empty() {
                errors.push("Record id filter is present but empty".to_string());
            }
        }

        errors
    }

    /// The selected groups as borrowed keys, for taxonomy expansion.
    pub fn group_keys(&self) -> Vec<&str> {
        self.groups.iter().map(String::as_str).collect()
    }
}
