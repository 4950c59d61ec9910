//! Response-shape normalization for the record-list endpoint.
//!
//! The portal backend is inconsistent about the record-list payload: it
//! sometimes returns a bare JSON array and sometimes an object wrapping
//! the array under a named field. Neither shape is canonical, so both
//! stay accepted and are normalized to a plain `Vec` here.

use serde::Deserialize;

use lgflow_core::model::LgRecordSummary;

/// Either shape of the record-list response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordListResponse {
    /// A bare array of records.
    Bare(Vec<LgRecordSummary>),
    /// An object wrapping the array under a named field.
    Wrapped(WrappedRecordList),
}

/// The wrapped form; the field name itself has varied across backend
/// revisions.
#[derive(Debug, Deserialize)]
pub struct WrappedRecordList {
    #[serde(alias = "lg_records", alias = "data")]
    pub records: Vec<LgRecordSummary>,
}

impl RecordListResponse {
    /// Normalize to the record list regardless of wire shape.
    pub fn into_records(self) -> Vec<LgRecordSummary> {
        match self {
            Self::Bare(records) => records,
            Self::Wrapped(wrapped) => wrapped.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_array() {
        let json = r#"[{"id": 1}, {"id": 2}]"#;
        let response: RecordListResponse = serde_json::from_str(json).unwrap();
        let records = response.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn parse_wrapped_under_records() {
        let json = r#"{"records": [{"id": 7}]}"#;
        let response: RecordListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_records()[0].id, 7);
    }

    #[test]
    fn parse_wrapped_under_lg_records() {
        let json = r#"{"lg_records": [{"id": 7}]}"#;
        let response: RecordListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_records()[0].id, 7);
    }

    #[test]
    fn parse_wrapped_under_data() {
        let json = r#"{"data": [{"id": 7}]}"#;
        let response: RecordListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_records()[0].id, 7);
    }

    #[test]
    fn parse_empty_bare_array() {
        let response: RecordListResponse = serde_json::from_str("[]").unwrap();
        assert!(response.into_records().is_empty());
    }

    #[test]
    fn parse_full_record_through_wrapper() {
        let json = r#"{"records": [{
            "id": 7,
            "issuer_name": "Acme",
            "lg_amount": 1000.0,
            "lg_currency": {"iso_code": "USD"}
        }]}"#;
        let records: Vec<LgRecordSummary> =
            serde_json::from_str::<RecordListResponse>(json).unwrap().into_records();
        assert_eq!(records[0].issuer_name.as_deref(), Some("Acme"));
        assert_eq!(records[0].lg_currency.as_ref().unwrap().iso_code, "USD");
    }

    #[test]
    fn unrecognized_wrapper_field_is_rejected() {
        let json = r#"{"items": [{"id": 7}]}"#;
        assert!(serde_json::from_str::<RecordListResponse>(json).is_err());
    }
}
