//! Merge & projection engine for the history export.
//!
//! Joins each [`HistoryEvent`] to its parent [`LgRecordSummary`] (left
//! outer join over an id-keyed map) and flattens the pair into one
//! [`ExportRow`] per event. The engine is pure: inputs are borrowed
//! immutably and every row is a fresh value, so running it twice over the
//! same fetched data yields identical output.

use std::collections::HashMap;

use crate::actions::action_label;
use crate::details::{ActionDetails, DetailColumns};
use crate::model::{HistoryEvent, LgRecordSummary};
use crate::types::Timestamp;

/// Placeholder for static columns with no value (unmatched parent record,
/// or a matched record missing the field).
pub const PLACEHOLDER: &str = "N/A";

/// Actor label for events with no acting user.
pub const SYSTEM_ACTOR: &str = "System";

// ---------------------------------------------------------------------------
// Export row
// ---------------------------------------------------------------------------

/// The flattened, denormalized join of one event with its (possibly
/// missing) parent record, plus derived display fields.
///
/// Created transiently per export and discarded after serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub lg_number: String,
    pub issuer_name: String,
    pub beneficiary: String,
    pub amount: Option<f64>,
    pub currency: String,
    pub lg_type: String,
    pub category: String,
    pub issuance_date: Option<chrono::NaiveDate>,
    pub internal_owner: String,
    pub issuing_bank: String,
    /// When the action occurred.
    pub occurred_at: Timestamp,
    /// Title-cased action label, e.g. `"LG Liquidated Full"`.
    pub action: String,
    /// Acting user email, or [`SYSTEM_ACTOR`].
    pub performed_by: String,
    /// Detail-derived columns; blank for action types that do not
    /// populate them.
    pub details: DetailColumns,
    /// Free-text narrative of the event.
    pub description: String,
}

// ---------------------------------------------------------------------------
// Join + projection
// ---------------------------------------------------------------------------

/// Build one export row per history event.
///
/// Records are indexed by id once; each event is then projected through
/// the map. Events whose `lg_record_id` is absent or matches no fetched
/// record still produce a row, with [`PLACEHOLDER`] static columns and
/// the event's own bank name as fallback.
pub fn build_export_rows(records: &[LgRecordSummary], events: &[HistoryEvent]) -> Vec<ExportRow> {
    let by_id: HashMap<_, _> = records.iter().map(|r| (r.id, r)).collect();

    let mut unmatched = 0usize;
    let rows = events
        .iter()
        .map(|event| {
            let record = event.lg_record_id.and_then(|id| by_id.get(&id).copied());
            if record.is_none() {
                unmatched += 1;
            }
            project(event, record)
        })
        .collect();

    if unmatched > 0 {
        // Possible data-completeness gap upstream (pagination ceiling or
        // filter mismatch); the rows still export with placeholders.
        tracing::warn!(unmatched, total = events.len(), "History events without a matching LG record");
    }

    rows
}

/// Flatten one event and its optional parent record into an export row.
fn project(event: &HistoryEvent, record: Option<&LgRecordSummary>) -> ExportRow {
    let parsed = ActionDetails::from_event(&event.action_type, &event.details);

    let lg_number = event
        .lg_number
        .clone()
        .or_else(|| record.and_then(|r| r.lg_number.clone()))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let issuing_bank = record
        .and_then(|r| r.issuing_bank_name.clone())
        .or_else(|| event.issuing_bank_name.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let performed_by = event
        .user_email
        .clone()
        .unwrap_or_else(|| SYSTEM_ACTOR.to_string());

    ExportRow {
        lg_number,
        issuer_name: static_text(record.and_then(|r| r.issuer_name.clone())),
        beneficiary: static_text(event.beneficiary_name.clone()),
        amount: record.and_then(|r| r.lg_amount),
        currency: static_text(record.and_then(|r| r.lg_currency.as_ref().map(|c| c.iso_code.clone()))),
        lg_type: static_text(record.and_then(|r| r.lg_type.as_ref().map(|t| t.name.clone()))),
        category: static_text(record.and_then(|r| r.lg_category.as_ref().map(|c| c.name.clone()))),
        issuance_date: record.and_then(|r| r.issuance_date),
        internal_owner: static_text(record.and_then(|r| r.internal_owner_email.clone())),
        issuing_bank,
        occurred_at: event.created_at,
        action: action_label(&event.action_type),
        performed_by: performed_by.clone(),
        description: describe_event(&event.action_type, &parsed, &performed_by),
        details: parsed.columns(),
    }
}

/// A static column value, or the placeholder when absent.
fn static_text(value: Option<String>) -> String {
    value.unwrap_or_else(|| PLACEHOLDER.to_string())
}

// ---------------------------------------------------------------------------
// Narrative synthesis
// ---------------------------------------------------------------------------

/// Synthesize the free-text summary for one event.
///
/// Combines the action label, a detail clause for the variants that carry
/// one, and the acting user (already resolved to [`SYSTEM_ACTOR`] when
/// absent).
pub fn describe_event(action_type: &str, details: &ActionDetails, actor: &str) -> String {
    let label = action_label(action_type);
    match detail_clause(details) {
        Some(clause) => format!("{label}: {clause}, performed by {actor}"),
        None => format!("{label}, performed by {actor}"),
    }
}

/// The variant-specific middle clause of the narrative, when the details
/// carry enough to say something.
fn detail_clause(details: &ActionDetails) -> Option<String> {
    match details {
        ActionDetails::Liquidation {
            old_amount: Some(old),
            new_amount: Some(new),
        } => Some(format!("amount changed from {old} to {new}")),

        ActionDetails::AmountDecrease {
            amount: Some(amount),
            ..
        } => Some(format!("amount decreased by {amount}")),
        ActionDetails::AmountDecrease {
            old_amount: Some(old),
            new_amount: Some(new),
            ..
        } => Some(format!("amount changed from {old} to {new}")),

        ActionDetails::Extension {
            old_expiry_date: Some(old),
            new_expiry_date: Some(new),
        } => Some(format!("expiry extended from {old} to {new}")),

        ActionDetails::Amendment {
            old_expiry_date,
            new_expiry_date,
            old_amount,
            new_amount,
        } => {
            let mut parts = Vec::new();
            if let (Some(old), Some(new)) = (old_expiry_date, new_expiry_date) {
                parts.push(format!("expiry changed from {old} to {new}"));
            }
            if let (Some(old), Some(new)) = (old_amount, new_amount) {
                parts.push(format!("amount changed from {old} to {new}"));
            }
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" and "))
            }
        }

        ActionDetails::Delivery {
            instruction_serial: Some(serial),
            delivery_date: Some(date),
        } => Some(format!("instruction {serial} delivered on {date}")),
        ActionDetails::Delivery {
            instruction_serial: Some(serial),
            ..
        } => Some(format!("instruction {serial} delivered")),

        ActionDetails::BankReply {
            instruction_serial: Some(serial),
            bank_reply_date: Some(date),
        } => Some(format!("bank replied to instruction {serial} on {date}")),
        ActionDetails::BankReply {
            instruction_serial: Some(serial),
            ..
        } => Some(format!("bank replied to instruction {serial}")),

        ActionDetails::Release {
            instruction_serial: Some(serial),
        } => Some(format!("instruction {serial}")),

        ActionDetails::Notification { subject, status } => match (subject, status) {
            (Some(subject), Some(status)) => Some(format!("\"{subject}\" ({status})")),
            (Some(subject), None) => Some(format!("\"{subject}\"")),
            _ => None,
        },

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
