//! Spreadsheet serialization for export rows.
//!
//! Converts the merged row set into an `.xlsx` workbook with a fixed
//! column schema. Column order and headers come from [`COLUMNS`] alone,
//! never from any single row's keys, so the header row is identical
//! across exports regardless of which action types are present.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use lgflow_core::merge::{ExportRow, PLACEHOLDER};

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// One output column: header text and fixed display width.
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

/// The fixed output schema, in file order.
pub const COLUMNS: &[Column] = &[
    Column { header: "LG Number", width: 18.0 },
    Column { header: "Issuer Name", width: 24.0 },
    Column { header: "Beneficiary", width: 24.0 },
    Column { header: "Amount", width: 14.0 },
    Column { header: "Currency", width: 10.0 },
    Column { header: "LG Type", width: 18.0 },
    Column { header: "Category", width: 18.0 },
    Column { header: "Original Issuance Date", width: 20.0 },
    Column { header: "Internal Owner", width: 26.0 },
    Column { header: "Issuing Bank", width: 24.0 },
    Column { header: "Date/Time", width: 20.0 },
    Column { header: "Action Type", width: 22.0 },
    Column { header: "Performed By (Email)", width: 26.0 },
    Column { header: "Instruction Serial", width: 18.0 },
    Column { header: "Delivery Date", width: 14.0 },
    Column { header: "Bank Reply Date", width: 14.0 },
    Column { header: "Old Expiry Date", width: 14.0 },
    Column { header: "New Expiry Date", width: 14.0 },
    Column { header: "Old Amount", width: 14.0 },
    Column { header: "New Amount", width: 14.0 },
    Column { header: "Amount Change", width: 14.0 },
    Column { header: "Notification Subject", width: 28.0 },
    Column { header: "Notification Status", width: 18.0 },
    Column { header: "Summary Description", width: 60.0 },
];

/// The header row, in file order.
pub fn headers() -> Vec<&'static str> {
    COLUMNS.iter().map(|c| c.header).collect()
}

/// Errors from the spreadsheet writer.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Spreadsheet write failed: {0}")]
    Xlsx(#[from] XlsxError),
}

// ---------------------------------------------------------------------------
// Workbook serialization
// ---------------------------------------------------------------------------

/// Serialize the rows into an `.xlsx` workbook in memory.
///
/// Succeeds on an empty row set (header-only file). Amounts are written
/// as numbers, dates as `YYYY-MM-DD` text, timestamps as
/// `YYYY-MM-DD HH:mm:ss` text; absent detail values leave the cell
/// blank.
pub fn write_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("History")?;

    let header_format = Format::new().set_bold();
    for (index, column) in COLUMNS.iter().enumerate() {
        let col = index as u16;
        sheet.set_column_width(col, column.width)?;
        sheet.write_string_with_format(0, col, column.header, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        write_row(sheet, (index + 1) as u32, row)?;
    }

    tracing::debug!(rows = rows.len(), "Serialized history workbook");
    Ok(workbook.save_to_buffer()?)
}

/// Write one export row at worksheet row `r`.
fn write_row(
    sheet: &mut rust_xlsxwriter::Worksheet,
    r: u32,
    row: &ExportRow,
) -> Result<(), SheetError> {
    sheet.write_string(r, 0, &row.lg_number)?;
    sheet.write_string(r, 1, &row.issuer_name)?;
    sheet.write_string(r, 2, &row.beneficiary)?;
    write_opt_number(sheet, r, 3, row.amount, PLACEHOLDER)?;
    sheet.write_string(r, 4, &row.currency)?;
    sheet.write_string(r, 5, &row.lg_type)?;
    sheet.write_string(r, 6, &row.category)?;
    match row.issuance_date {
        Some(date) => sheet.write_string(r, 7, &fmt_date(date))?,
        None => sheet.write_string(r, 7, PLACEHOLDER)?,
    };
    sheet.write_string(r, 8, &row.internal_owner)?;
    sheet.write_string(r, 9, &row.issuing_bank)?;
    sheet.write_string(r, 10, &row.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
    sheet.write_string(r, 11, &row.action)?;
    sheet.write_string(r, 12, &row.performed_by)?;

    let details = &row.details;
    write_opt_string(sheet, r, 13, details.instruction_serial.as_deref())?;
    write_opt_date(sheet, r, 14, details.delivery_date)?;
    write_opt_date(sheet, r, 15, details.bank_reply_date)?;
    write_opt_date(sheet, r, 16, details.old_expiry_date)?;
    write_opt_date(sheet, r, 17, details.new_expiry_date)?;
    write_opt_detail_number(sheet, r, 18, details.old_amount)?;
    write_opt_detail_number(sheet, r, 19, details.new_amount)?;
    write_opt_detail_number(sheet, r, 20, details.amount_change)?;
    write_opt_string(sheet, r, 21, details.notification_subject.as_deref())?;
    write_opt_string(sheet, r, 22, details.notification_status.as_deref())?;

    sheet.write_string(r, 23, &row.description)?;
    Ok(())
}

/// Static numeric cell: a number, or the placeholder text when absent.
fn write_opt_number(
    sheet: &mut rust_xlsxwriter::Worksheet,
    r: u32,
    c: u16,
    value: Option<f64>,
    placeholder: &str,
) -> Result<(), SheetError> {
    match value {
        Some(v) => sheet.write_number(r, c, v)?,
        None => sheet.write_string(r, c, placeholder)?,
    };
    Ok(())
}

/// Detail numeric cell: a number, or blank when absent.
fn write_opt_detail_number(
    sheet: &mut rust_xlsxwriter::Worksheet,
    r: u32,
    c: u16,
    value: Option<f64>,
) -> Result<(), SheetError> {
    if let Some(v) = value {
        sheet.write_number(r, c, v)?;
    }
    Ok(())
}

/// Detail text cell: text, or blank when absent.
fn write_opt_string(
    sheet: &mut rust_xlsxwriter::Worksheet,
    r: u32,
    c: u16,
    value: Option<&str>,
) -> Result<(), SheetError> {
    if let Some(v) = value {
        sheet.write_string(r, c, v)?;
    }
    Ok(())
}

/// Detail date cell: `YYYY-MM-DD` text, or blank when absent.
fn write_opt_date(
    sheet: &mut rust_xlsxwriter::Worksheet,
    r: u32,
    c: u16,
    value: Option<NaiveDate>,
) -> Result<(), SheetError> {
    if let Some(date) = value {
        sheet.write_string(r, c, &fmt_date(date))?;
    }
    Ok(())
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Export artifact
// ---------------------------------------------------------------------------

/// Filename for an export triggered on `date`:
/// `LG_History_Export_<YYYYMMDD>.xlsx`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("LG_History_Export_{}.xlsx", date.format("%Y%m%d"))
}

/// A finished export artifact: filename plus workbook bytes.
///
/// The host application hands this to the user (browser download, saved
/// file, attachment).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the artifact into `dir` under its own filename.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
