//! Query-parameter assembly helpers.

use chrono::NaiveDate;

/// Join values into the comma-separated form the portal expects for list
/// parameters (`lg_record_ids`, `action_types`).
pub fn csv<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a calendar date as the portal's `YYYY-MM-DD` parameter form.
pub fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_of_ids() {
        assert_eq!(csv(&[7i64, 9, 23]), "7,9,23");
    }

    #[test]
    fn csv_of_codes() {
        assert_eq!(
            csv(&["LG_LIQUIDATED_FULL", "LG_DECREASED_AMOUNT"]),
            "LG_LIQUIDATED_FULL,LG_DECREASED_AMOUNT"
        );
    }

    #[test]
    fn csv_of_single_item() {
        assert_eq!(csv(&[7i64]), "7");
    }

    #[test]
    fn csv_of_empty_slice() {
        assert_eq!(csv::<i64>(&[]), "");
    }

    #[test]
    fn date_param_is_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(date_param(date), "2024-06-01");
    }

    #[test]
    fn date_param_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_param(date), "2024-01-05");
    }
}
