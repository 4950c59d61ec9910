//! Shared fixtures for the export pipeline integration tests: an
//! in-memory mock portal plus canned records and events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

use lgflow_client::LgApiError;
use lgflow_core::actions::action_types;
use lgflow_core::model::{CurrencyRef, HistoryEvent, LgRecordSummary, NamedRef};
use lgflow_core::types::RecordId;
use lgflow_export::LgPortal;

/// Canned portal returning fixed data, with call tracking.
#[derive(Default)]
pub struct MockPortal {
    pub records: Vec<LgRecordSummary>,
    pub events: Vec<HistoryEvent>,
    pub fail_records: bool,
    pub fail_history: bool,
    pub record_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    /// The `action_types` filter the pipeline passed on the last history
    /// fetch (`None` = filter omitted).
    pub seen_action_filter: Mutex<Option<Option<Vec<String>>>>,
}

impl LgPortal for MockPortal {
    async fn fetch_lg_records(
        &self,
        _ids: Option<&[RecordId]>,
    ) -> Result<Vec<LgRecordSummary>, LgApiError> {
        self.record_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_records {
            return Err(LgApiError::Api {
                status: 500,
                body: "record fetch failed".to_string(),
            });
        }
        Ok(self.records.clone())
    }

    async fn fetch_lifecycle_history(
        &self,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
        action_types: Option<&[&str]>,
        _ids: Option<&[RecordId]>,
    ) -> Result<Vec<HistoryEvent>, LgApiError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_action_filter.lock().unwrap() =
            Some(action_types.map(|codes| codes.iter().map(|c| c.to_string()).collect()));
        if self.fail_history {
            return Err(LgApiError::Api {
                status: 502,
                body: "history fetch failed".to_string(),
            });
        }
        Ok(self.events.clone())
    }
}

pub fn acme_record() -> LgRecordSummary {
    LgRecordSummary {
        id: 7,
        lg_number: Some("LG-2024-0042".to_string()),
        issuer_name: Some("Acme".to_string()),
        lg_amount: Some(1000.0),
        lg_currency: Some(CurrencyRef {
            iso_code: "USD".to_string(),
        }),
        lg_type: Some(NamedRef {
            name: "Performance".to_string(),
        }),
        lg_category: Some(NamedRef {
            name: "Construction".to_string(),
        }),
        internal_owner_email: Some("owner@acme.example".to_string()),
        issuance_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        issuing_bank_name: Some("First Bank".to_string()),
    }
}

pub fn liquidation_event(record_id: Option<RecordId>) -> HistoryEvent {
    HistoryEvent {
        lg_record_id: record_id,
        lg_number: Some("LG-2024-0042".to_string()),
        action_type: action_types::LG_LIQUIDATED_FULL.to_string(),
        details: json!({"old_amount": 1000, "new_amount": 0}),
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap(),
        user_email: Some("a@b.com".to_string()),
        beneficiary_name: Some("Municipality".to_string()),
        issuing_bank_name: Some("Second Bank".to_string()),
    }
}
