//! CSV export
//!
//! One header row, then one row per report in input order. Dates render
//! in ISO calendar form; quoting follows the delimited-text standard.

use anyhow::Result;
use csv::Writer;

use super::COLUMNS;
use crate::db::Report;

pub const CONTENT_TYPE: &str = "text/csv";
pub const FILENAME: &str = "reports.csv";

/// Render the reports as delimited text.
pub fn write_reports(reports: &[Report]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(vec![]);

    writer.write_record(COLUMNS)?;

    for report in reports {
        writer.write_record([
            report.id.to_string(),
            report.customer_name.clone(),
            report.hospital_name.clone(),
            report.ward_name.clone(),
            report.grade.clone(),
            report.date.to_string(),
            report.shift_time.clone(),
        ])?;
    }

    Ok(writer.into_inner()?)
}
