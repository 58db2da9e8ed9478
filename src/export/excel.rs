//! Spreadsheet export
//!
//! Single "Reports" worksheet with the same columns as the CSV export.
//! No styling, formulas, or additional sheets.

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use super::COLUMNS;
use crate::db::Report;

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const FILENAME: &str = "reports.xlsx";

/// Render the reports as an OOXML workbook.
pub fn write_reports(reports: &[Report]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Reports")?;

    for (col, label) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *label)?;
    }

    for (row, report) in reports.iter().enumerate() {
        let row = row as u32 + 1;
        worksheet.write_number(row, 0, report.id as f64)?;
        worksheet.write_string(row, 1, &report.customer_name)?;
        worksheet.write_string(row, 2, &report.hospital_name)?;
        worksheet.write_string(row, 3, &report.ward_name)?;
        worksheet.write_string(row, 4, &report.grade)?;
        worksheet.write_string(row, 5, &report.date.to_string())?;
        worksheet.write_string(row, 6, &report.shift_time)?;
    }

    Ok(workbook.save_to_buffer()?)
}
