//! Structured-details extraction for lifecycle history events.
//!
//! The backend stores a free-form `details` blob per event whose shape
//! varies by action type. This module deserializes that blob into a
//! typed [`ActionDetails`] variant and projects it into the fixed
//! [`DetailColumns`] superset used by the export sheet. Extraction is
//! lenient throughout: a missing or malformed key degrades to `None`,
//! never to an error, so one bad blob cannot abort a whole export.

use chrono::NaiveDate;
use serde_json::Value;

use crate::actions::action_types;

// ---------------------------------------------------------------------------
// Tagged union of per-action detail shapes
// ---------------------------------------------------------------------------

/// Typed view of an event's `details` blob, one variant per action family.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionDetails {
    /// Full or partial liquidation.
    Liquidation {
        old_amount: Option<f64>,
        new_amount: Option<f64>,
    },
    /// Standalone amount decrease; `amount` is the explicit decrease when
    /// the backend supplies one.
    AmountDecrease {
        old_amount: Option<f64>,
        new_amount: Option<f64>,
        amount: Option<f64>,
    },
    /// Expiry extension.
    Extension {
        old_expiry_date: Option<NaiveDate>,
        new_expiry_date: Option<NaiveDate>,
    },
    /// General amendment; may touch expiry dates, amounts, or both.
    Amendment {
        old_expiry_date: Option<NaiveDate>,
        new_expiry_date: Option<NaiveDate>,
        old_amount: Option<f64>,
        new_amount: Option<f64>,
    },
    /// Instruction delivered to the bank.
    Delivery {
        instruction_serial: Option<String>,
        delivery_date: Option<NaiveDate>,
    },
    /// Bank replied to a delivered instruction.
    BankReply {
        instruction_serial: Option<String>,
        bank_reply_date: Option<NaiveDate>,
    },
    /// Guarantee released.
    Release { instruction_serial: Option<String> },
    /// Outbound notification or reminder.
    Notification {
        subject: Option<String>,
        status: Option<String>,
    },
    /// Anything else (activation, unknown codes, unusable blobs).
    Other,
}

impl ActionDetails {
    /// Extract the typed details for an event.
    ///
    /// The variant is selected by `action_type`; each variant pulls only
    /// the keys it knows about. Non-object blobs (including `null`) fall
    /// through to empty variant fields.
    pub fn from_event(action_type: &str, details: &Value) -> Self {
        match action_type {
            action_types::LG_LIQUIDATED_FULL | action_types::LG_LIQUIDATED_PARTIAL => {
                Self::Liquidation {
                    old_amount: opt_f64(details, "old_amount"),
                    new_amount: opt_f64(details, "new_amount"),
                }
            }
            action_types::LG_DECREASED_AMOUNT => Self::AmountDecrease {
                old_amount: opt_f64(details, "old_amount"),
                new_amount: opt_f64(details, "new_amount"),
                amount: opt_f64(details, "amount"),
            },
            action_types::LG_EXTENDED => Self::Extension {
                old_expiry_date: opt_date(details, "old_expiry_date"),
                new_expiry_date: opt_date(details, "new_expiry_date"),
            },
            action_types::LG_AMENDED => Self::Amendment {
                old_expiry_date: opt_date(details, "old_expiry_date"),
                new_expiry_date: opt_date(details, "new_expiry_date"),
                old_amount: opt_f64(details, "old_amount"),
                new_amount: opt_f64(details, "new_amount"),
            },
            action_types::LG_INSTRUCTION_DELIVERED => Self::Delivery {
                instruction_serial: opt_string(details, "instruction_serial"),
                delivery_date: opt_date(details, "delivery_date"),
            },
            action_types::BANK_REPLY_RECEIVED => Self::BankReply {
                instruction_serial: opt_string(details, "instruction_serial"),
                bank_reply_date: opt_date(details, "bank_reply_date"),
            },
            action_types::LG_RELEASED => Self::Release {
                instruction_serial: opt_string(details, "instruction_serial"),
            },
            action_types::NOTIFICATION_SENT | action_types::REMINDER_SENT => Self::Notification {
                subject: opt_string(details, "subject"),
                status: opt_string(details, "status"),
            },
            _ => Self::Other,
        }
    }

    /// Project this variant into the fixed output-column superset.
    pub fn columns(&self) -> DetailColumns {
        let mut cols = DetailColumns::default();
        match self {
            Self::Liquidation {
                old_amount,
                new_amount,
            } => {
                cols.old_amount = *old_amount;
                cols.new_amount = *new_amount;
                cols.amount_change = diff(*old_amount, *new_amount);
            }
            Self::AmountDecrease {
                old_amount,
                new_amount,
                amount,
            } => {
                cols.old_amount = *old_amount;
                cols.new_amount = *new_amount;
                cols.amount_change = amount.or_else(|| diff(*old_amount, *new_amount));
            }
            Self::Extension {
                old_expiry_date,
                new_expiry_date,
            } => {
                cols.old_expiry_date = *old_expiry_date;
                cols.new_expiry_date = *new_expiry_date;
            }
            Self::Amendment {
                old_expiry_date,
                new_expiry_date,
                old_amount,
                new_amount,
            } => {
                cols.old_expiry_date = *old_expiry_date;
                cols.new_expiry_date = *new_expiry_date;
                cols.old_amount = *old_amount;
                cols.new_amount = *new_amount;
            }
            Self::Delivery {
                instruction_serial,
                delivery_date,
            } => {
                cols.instruction_serial = instruction_serial.clone();
                cols.delivery_date = *delivery_date;
            }
            Self::BankReply {
                instruction_serial,
                bank_reply_date,
            } => {
                cols.instruction_serial = instruction_serial.clone();
                cols.bank_reply_date = *bank_reply_date;
            }
            Self::Release { instruction_serial } => {
                cols.instruction_serial = instruction_serial.clone();
            }
            Self::Notification { subject, status } => {
                cols.notification_subject = subject.clone();
                cols.notification_status = status.clone();
            }
            Self::Other => {}
        }
        cols
    }
}

// ---------------------------------------------------------------------------
// Fixed output-column superset
// ---------------------------------------------------------------------------

/// The union of all detail-derived export columns.
///
/// Every export row carries all of these; action types populate different
/// subsets, so most fields are `None` on most rows by design.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailColumns {
    pub instruction_serial: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub bank_reply_date: Option<NaiveDate>,
    pub old_expiry_date: Option<NaiveDate>,
    pub new_expiry_date: Option<NaiveDate>,
    pub old_amount: Option<f64>,
    pub new_amount: Option<f64>,
    pub amount_change: Option<f64>,
    pub notification_subject: Option<String>,
    pub notification_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Lenient key readers
// ---------------------------------------------------------------------------

/// `old - new`, when both sides are present.
fn diff(old: Option<f64>, new: Option<f64>) -> Option<f64> {
    match (old, new) {
        (Some(o), Some(n)) => Some(o - n),
        _ => None,
    }
}

/// Read a string key; numbers are stringified (serials sometimes arrive
/// as integers).
fn opt_string(details: &Value, key: &str) -> Option<String> {
    match details.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a numeric key; numeric strings are accepted.
fn opt_f64(details: &Value, key: &str) -> Option<f64> {
    match details.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Read a `YYYY-MM-DD` date key.
fn opt_date(details: &Value, key: &str) -> Option<NaiveDate> {
    details
        .get(key)?
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_liquidation_extracts_amounts() {
        let details = json!({"old_amount": 1000, "new_amount": 0});
        let parsed = ActionDetails::from_event(action_types::LG_LIQUIDATED_FULL, &details);
        let cols = parsed.columns();
        assert_eq!(cols.old_amount, Some(1000.0));
        assert_eq!(cols.new_amount, Some(0.0));
        assert_eq!(cols.amount_change, Some(1000.0));
    }

    #[test]
    fn partial_liquidation_computes_change() {
        let details = json!({"old_amount": 1000, "new_amount": 400});
        let cols = ActionDetails::from_event(action_types::LG_LIQUIDATED_PARTIAL, &details).columns();
        assert_eq!(cols.amount_change, Some(600.0));
    }

    #[test]
    fn decrease_prefers_explicit_amount() {
        let details = json!({"old_amount": 500, "new_amount": 300, "amount": 200});
        let cols = ActionDetails::from_event(action_types::LG_DECREASED_AMOUNT, &details).columns();
        assert_eq!(cols.amount_change, Some(200.0));
    }

    #[test]
    fn decrease_falls_back_to_computed_change() {
        let details = json!({"old_amount": 500, "new_amount": 300});
        let cols = ActionDetails::from_event(action_types::LG_DECREASED_AMOUNT, &details).columns();
        assert_eq!(cols.amount_change, Some(200.0));
    }

    #[test]
    fn extension_extracts_expiry_dates() {
        let details = json!({"old_expiry_date": "2024-05-01", "new_expiry_date": "2025-05-01"});
        let cols = ActionDetails::from_event(action_types::LG_EXTENDED, &details).columns();
        assert_eq!(
            cols.old_expiry_date,
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert_eq!(
            cols.new_expiry_date,
            NaiveDate::from_ymd_opt(2025, 5, 1)
        );
        assert!(cols.old_amount.is_none());
    }

    #[test]
    fn delivery_extracts_serial_and_date() {
        let details = json!({"instruction_serial": "INS-009", "delivery_date": "2024-07-15"});
        let cols =
            ActionDetails::from_event(action_types::LG_INSTRUCTION_DELIVERED, &details).columns();
        assert_eq!(cols.instruction_serial.as_deref(), Some("INS-009"));
        assert_eq!(cols.delivery_date, NaiveDate::from_ymd_opt(2024, 7, 15));
    }

    #[test]
    fn numeric_serial_is_stringified() {
        let details = json!({"instruction_serial": 42});
        let cols = ActionDetails::from_event(action_types::LG_RELEASED, &details).columns();
        assert_eq!(cols.instruction_serial.as_deref(), Some("42"));
    }

    #[test]
    fn bank_reply_extracts_reply_date() {
        let details = json!({"instruction_serial": "INS-009", "bank_reply_date": "2024-07-20"});
        let cols = ActionDetails::from_event(action_types::BANK_REPLY_RECEIVED, &details).columns();
        assert_eq!(cols.bank_reply_date, NaiveDate::from_ymd_opt(2024, 7, 20));
        assert!(cols.delivery_date.is_none());
    }

    #[test]
    fn notification_extracts_subject_and_status() {
        let details = json!({"subject": "Expiry reminder", "status": "sent"});
        let cols = ActionDetails::from_event(action_types::NOTIFICATION_SENT, &details).columns();
        assert_eq!(cols.notification_subject.as_deref(), Some("Expiry reminder"));
        assert_eq!(cols.notification_status.as_deref(), Some("sent"));
    }

    #[test]
    fn activation_has_no_detail_columns() {
        let details = json!({"anything": "ignored"});
        let cols = ActionDetails::from_event(action_types::LG_ACTIVATED, &details).columns();
        assert_eq!(cols, DetailColumns::default());
    }

    #[test]
    fn unknown_action_type_is_other() {
        let parsed = ActionDetails::from_event("SOMETHING_NEW", &json!({}));
        assert_eq!(parsed, ActionDetails::Other);
    }

    // -----------------------------------------------------------------------
    // Malformed blobs degrade, never fail
    // -----------------------------------------------------------------------

    #[test]
    fn null_details_yield_empty_fields() {
        let cols =
            ActionDetails::from_event(action_types::LG_LIQUIDATED_FULL, &Value::Null).columns();
        assert_eq!(cols, DetailColumns::default());
    }

    #[test]
    fn non_object_details_yield_empty_fields() {
        let cols =
            ActionDetails::from_event(action_types::LG_EXTENDED, &json!("not an object")).columns();
        assert_eq!(cols, DetailColumns::default());
    }

    #[test]
    fn wrong_value_types_degrade_per_key() {
        let details = json!({"old_amount": "not a number", "new_amount": 400});
        let cols = ActionDetails::from_event(action_types::LG_LIQUIDATED_PARTIAL, &details).columns();
        assert!(cols.old_amount.is_none());
        assert_eq!(cols.new_amount, Some(400.0));
        // Change needs both sides.
        assert!(cols.amount_change.is_none());
    }

    #[test]
    fn numeric_string_amount_is_accepted() {
        let details = json!({"old_amount": "1000", "new_amount": "250.5"});
        let cols = ActionDetails::from_event(action_types::LG_LIQUIDATED_PARTIAL, &details).columns();
        assert_eq!(cols.old_amount, Some(1000.0));
        assert_eq!(cols.new_amount, Some(250.5));
    }

    #[test]
    fn unparseable_date_degrades_to_none() {
        let details = json!({"old_expiry_date": "05/01/2024", "new_expiry_date": "2025-05-01"});
        let cols = ActionDetails::from_event(action_types::LG_EXTENDED, &details).columns();
        assert!(cols.old_expiry_date.is_none());
        assert_eq!(cols.new_expiry_date, NaiveDate::from_ymd_opt(2025, 5, 1));
    }
}
