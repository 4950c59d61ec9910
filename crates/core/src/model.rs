//! Wire-shaped data model for LG records and lifecycle history events.
//!
//! These types mirror the portal backend's JSON payloads. Both are
//! fetched fresh for every export request and owned by the merge step for
//! the duration of that export -- nothing here is cached or mutated.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// LG record summary
// ---------------------------------------------------------------------------

/// A currency reference as the backend nests it on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRef {
    pub iso_code: String,
}

/// A named lookup reference (LG type, LG category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// One row per Letter of Guarantee, as returned by the record endpoint.
///
/// Optional fields default to `None` when the backend omits them; the
/// merge engine substitutes a placeholder at projection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LgRecordSummary {
    pub id: RecordId,

    /// Display number of the guarantee (e.g. `"LG-2024-0042"`).
    #[serde(default)]
    pub lg_number: Option<String>,

    #[serde(default)]
    pub issuer_name: Option<String>,

    #[serde(default)]
    pub lg_amount: Option<f64>,

    #[serde(default)]
    pub lg_currency: Option<CurrencyRef>,

    #[serde(default)]
    pub lg_type: Option<NamedRef>,

    #[serde(default)]
    pub lg_category: Option<NamedRef>,

    #[serde(default)]
    pub internal_owner_email: Option<String>,

    /// Original issuance date of the guarantee.
    #[serde(default)]
    pub issuance_date: Option<chrono::NaiveDate>,

    #[serde(default)]
    pub issuing_bank_name: Option<String>,
}

// ---------------------------------------------------------------------------
// History event
// ---------------------------------------------------------------------------

/// One lifecycle action taken against an LG.
///
/// `lg_record_id` may be absent; an event with no matching parent record
/// still exports, with placeholder static columns. A missing `user_email`
/// marks a system-originated action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    #[serde(default)]
    pub lg_record_id: Option<RecordId>,

    #[serde(default)]
    pub lg_number: Option<String>,

    /// Action-type code, e.g. `"LG_LIQUIDATED_FULL"`.
    pub action_type: String,

    /// Free-form structured details; shape varies by action type.
    #[serde(default)]
    pub details: serde_json::Value,

    /// When the action occurred (UTC).
    pub created_at: Timestamp,

    #[serde(default)]
    pub user_email: Option<String>,

    #[serde(default)]
    pub beneficiary_name: Option<String>,

    /// Bank name carried on the event itself, used as a fallback when the
    /// parent record lookup misses.
    #[serde(default)]
    pub issuing_bank_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_parses_full_payload() {
        let json = r#"{
            "id": 7,
            "lg_number": "LG-2024-0042",
            "issuer_name": "Acme",
            "lg_amount": 1000.0,
            "lg_currency": {"iso_code": "USD"},
            "lg_type": {"name": "Performance"},
            "lg_category": {"name": "Construction"},
            "internal_owner_email": "owner@acme.example",
            "issuance_date": "2024-03-01",
            "issuing_bank_name": "First Bank"
        }"#;
        let record: LgRecordSummary = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.issuer_name.as_deref(), Some("Acme"));
        assert_eq!(record.lg_currency.unwrap().iso_code, "USD");
        assert_eq!(
            record.issuance_date,
            Some(chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn record_parses_with_only_id() {
        let record: LgRecordSummary = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(record.id, 3);
        assert!(record.lg_number.is_none());
        assert!(record.lg_amount.is_none());
    }

    #[test]
    fn event_parses_without_parent_record() {
        let json = r#"{
            "action_type": "NOTIFICATION_SENT",
            "created_at": "2024-06-01T10:30:00Z",
            "details": {"subject": "Expiry reminder", "status": "sent"}
        }"#;
        let event: HistoryEvent = serde_json::from_str(json).unwrap();
        assert!(event.lg_record_id.is_none());
        assert!(event.user_email.is_none());
        assert_eq!(event.action_type, "NOTIFICATION_SENT");
    }

    #[test]
    fn event_defaults_details_to_null() {
        let json = r#"{"action_type": "LG_ACTIVATED", "created_at": "2024-06-01T10:30:00Z"}"#;
        let event: HistoryEvent = serde_json::from_str(json).unwrap();
        assert!(event.details.is_null());
    }
}
