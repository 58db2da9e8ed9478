//! PDF export
//!
//! Renders the report table as a real PDF document: A4 portrait, builtin
//! Helvetica, header row in bold, one row per report, paginated when the
//! page fills.

use anyhow::Result;
use printpdf::*;
use std::io::BufWriter;

use super::COLUMNS;
use crate::db::Report;

pub const CONTENT_TYPE: &str = "application/pdf";
pub const FILENAME: &str = "reports.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 20.0;
const ROW_STEP: f32 = 6.0;
const FONT_SIZE_BODY: f32 = 9.0;

/// X position of each column, in mm from the left edge.
const COLUMN_X: [f32; 7] = [12.0, 28.0, 62.0, 96.0, 126.0, 146.0, 176.0];

/// Render the reports as a PDF table.
pub fn write_reports(reports: &[Report]) -> Result<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Reports",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut current_layer = doc.get_page(page1).get_layer(layer1);
    let mut y_pos = TOP_Y;

    draw_header_row(&current_layer, &font_bold, &mut y_pos);

    for report in reports {
        if y_pos < BOTTOM_Y {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current_layer = doc.get_page(next_page).get_layer(next_layer);
            y_pos = TOP_Y;

            draw_header_row(&current_layer, &font_bold, &mut y_pos);
        }

        let cells = [
            report.id.to_string(),
            report.customer_name.clone(),
            report.hospital_name.clone(),
            report.ward_name.clone(),
            report.grade.clone(),
            report.date.to_string(),
            report.shift_time.clone(),
        ];
        for (cell, x) in cells.iter().zip(COLUMN_X) {
            current_layer.use_text(cell.as_str(), FONT_SIZE_BODY, Mm(x), Mm(y_pos), &font);
        }

        y_pos -= ROW_STEP;
    }

    // Save to bytes
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)?;
    let bytes = buf.into_inner()?;

    Ok(bytes)
}

fn draw_header_row(layer: &PdfLayerReference, font_bold: &IndirectFontRef, y_pos: &mut f32) {
    for (label, x) in COLUMNS.iter().zip(COLUMN_X) {
        layer.use_text(*label, FONT_SIZE_BODY, Mm(x), Mm(*y_pos), font_bold);
    }

    *y_pos -= ROW_STEP;
}
