use std::io::Read;
use std::path::Path;

use crate::batch::columns::{resolve_columns, ColumnLayout, ColumnMap};
use crate::error::AppError;
use crate::models::{PollutantReading, ACTUAL_COLUMN, FEATURE_COLUMNS, N_FEATURES};

/// Readings parsed from an upload, with ground truth when the file has a
/// `max` column.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInput {
    pub readings: Vec<PollutantReading>,
    pub actuals: Option<Vec<f64>>,
}

impl BatchInput {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn has_actual(&self) -> bool {
        self.actuals.is_some()
    }
}

/// Parse a CSV file from `path`.
pub fn parse_csv(path: &Path) -> Result<BatchInput, AppError> {
    let file = std::fs::File::open(path)?;
    parse_csv_reader(std::io::BufReader::new(file))
}

/// Parse CSV text from any `Read` source.
///
/// All-or-nothing: the first bad row fails the whole upload.
pub fn parse_csv_reader<R: Read>(reader: R) -> Result<BatchInput, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let layout = resolve_columns(&ColumnMap::from_headers(&headers))?;

    let mut readings = Vec::new();
    let mut actuals = layout.actual.map(|_| Vec::new());

    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row_idx + 2; // +1 for the header row, +1 for 1-based lines

        readings.push(parse_reading(&record, &layout, line)?);
        if let (Some(col), Some(values)) = (layout.actual, actuals.as_mut()) {
            values.push(parse_number(&record, col, ACTUAL_COLUMN, line)?);
        }
    }

    if readings.is_empty() {
        return Err(AppError::EmptyFile);
    }

    Ok(BatchInput { readings, actuals })
}

fn parse_reading(
    record: &csv::StringRecord,
    layout: &ColumnLayout,
    line: usize,
) -> Result<PollutantReading, AppError> {
    let mut features = [0.0; N_FEATURES];
    for (i, (&col, name)) in layout.features.iter().zip(FEATURE_COLUMNS).enumerate() {
        features[i] = parse_number(record, col, name, line)?;
    }
    Ok(PollutantReading::from_features(features))
}

fn parse_number(
    record: &csv::StringRecord,
    col: usize,
    name: &str,
    line: usize,
) -> Result<f64, AppError> {
    let raw = record.get(col).unwrap_or("").trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::InvalidValue {
            line,
            column: name.to_string(),
            value: raw.to_string(),
        })
}
