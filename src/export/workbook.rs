use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::batch::BatchResult;
use crate::error::Result;
use crate::export::{
    create_category_format, create_header_format, create_number_format, SHEET_NAME,
};
use crate::models::FEATURE_LABELS;

/// Header row for a batch, with the evaluation columns only when the upload
/// carried ground truth.
pub fn export_headers(has_actual: bool) -> Vec<&'static str> {
    let mut headers: Vec<&'static str> = FEATURE_LABELS.to_vec();
    if has_actual {
        headers.push("Max");
    }
    headers.extend(["Prediksi", "Kategori"]);
    if has_actual {
        headers.extend(["Selisih", "Status"]);
    }
    headers
}

/// Build the `Hasil Prediksi` workbook and return its bytes.
pub fn generate_prediction_workbook(batch: &BatchResult) -> Result<Vec<u8>> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(SHEET_NAME)?;
    write_rows(ws, batch)?;
    Ok(wb.save_to_buffer()?)
}

fn write_rows(ws: &mut Worksheet, batch: &BatchResult) -> std::result::Result<(), XlsxError> {
    let hdr = create_header_format();
    let num = create_number_format();

    let headers = export_headers(batch.has_actual);
    for (col, title) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *title, &hdr)?;
        ws.set_column_width(col as u16, 14)?;
    }
    for (name, width) in [("Kategori", 20), ("Status", 22)] {
        if let Some(col) = column_of(&headers, name) {
            ws.set_column_width(col, width)?;
        }
    }
    ws.set_freeze_panes(1, 0)?;

    for (i, row) in batch.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        let mut col: u16 = 0;

        for value in row.reading.features() {
            ws.write(r, col, value)?;
            col += 1;
        }

        if let Some(eval) = row.evaluation.filter(|_| batch.has_actual) {
            ws.write(r, col, eval.actual)?;
            col += 1;
        }

        ws.write_with_format(r, col, row.prediction.value, &num)?;
        col += 1;

        let category = row.prediction.category;
        ws.write_with_format(r, col, category.label(), &create_category_format(category))?;
        col += 1;

        if let Some(eval) = row.evaluation.filter(|_| batch.has_actual) {
            ws.write_with_format(r, col, eval.difference, &num)?;
            let status = status_format(eval.verdict.needs_review());
            ws.write_with_format(r, col + 1, eval.verdict.label(), &status)?;
        }
    }

    Ok(())
}

fn column_of(headers: &[&str], name: &str) -> Option<u16> {
    headers.iter().position(|h| *h == name).map(|i| i as u16)
}

fn status_format(needs_review: bool) -> Format {
    if needs_review {
        Format::new().set_bold()
    } else {
        Format::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchRow;
    use crate::models::{evaluate, PollutantReading, PredictionResult};

    fn batch(has_actual: bool) -> BatchResult {
        let reading = PollutantReading::new(50.0, 30.0, 12.0, 1.5, 100.0, 35.0);
        let prediction = PredictionResult::new(120.0);
        BatchResult {
            rows: vec![BatchRow {
                reading,
                prediction,
                evaluation: has_actual.then(|| evaluate(120.0, 118.5)),
            }],
            has_actual,
        }
    }

    #[test]
    fn test_headers_without_actual() {
        assert_eq!(
            export_headers(false),
            vec!["PM10", "PM2.5", "SO2", "CO", "O3", "NO2", "Prediksi", "Kategori"]
        );
    }

    #[test]
    fn test_headers_with_actual() {
        assert_eq!(
            export_headers(true),
            vec![
                "PM10", "PM2.5", "SO2", "CO", "O3", "NO2", "Max", "Prediksi", "Kategori",
                "Selisih", "Status"
            ]
        );
    }

    #[test]
    fn test_workbook_bytes_are_zip() {
        for has_actual in [false, true] {
            let bytes = generate_prediction_workbook(&batch(has_actual)).unwrap();
            assert!(bytes.len() > 4, "XLSX bytes should be non-trivial");
            assert_eq!(bytes[0], 0x50, "First byte should be 0x50 (P)");
            assert_eq!(bytes[1], 0x4B, "Second byte should be 0x4B (K)");
        }
    }
}
