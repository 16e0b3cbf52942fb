use std::collections::HashMap;

use crate::error::AppError;
use crate::models::{ACTUAL_COLUMN, FEATURE_COLUMNS, N_FEATURES};

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    /// Build a ColumnMap from the CSV header record.
    /// Header fields are trimmed of surrounding whitespace. A repeated name
    /// maps to its first column.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        for (i, field) in headers.iter().enumerate() {
            indices.entry(field.trim().to_string()).or_insert(i);
        }
        ColumnMap { indices }
    }

    /// Index of a named column.
    pub fn index(&self, col: &str) -> Option<usize> {
        self.indices.get(col).copied()
    }

    /// Returns true if the column is present in the CSV headers.
    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }
}

/// Positions of the columns the batch flow reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Pollutant columns in model order
    pub features: [usize; N_FEATURES],
    /// Ground-truth column, when the upload has one
    pub actual: Option<usize>,
}

/// Resolve the required pollutant columns and the optional `max` column.
/// Returns `AppError::MissingColumns` listing every absent required column.
pub fn resolve_columns(col_map: &ColumnMap) -> Result<ColumnLayout, AppError> {
    let missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingColumns(missing));
    }

    let mut features = [0usize; N_FEATURES];
    for (slot, name) in features.iter_mut().zip(FEATURE_COLUMNS) {
        *slot = col_map.index(name).unwrap_or_default();
    }

    Ok(ColumnLayout {
        features,
        actual: col_map.index(ACTUAL_COLUMN),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_column_map_trim_whitespace() {
        let cm = ColumnMap::from_headers(&make_headers(&[" ozon ", "max"]));
        assert!(cm.has("ozon"));
        assert_eq!(cm.index("max"), Some(1));
        assert!(!cm.has("Missing"));
    }

    #[test]
    fn test_repeated_header_keeps_first_column() {
        let cm = ColumnMap::from_headers(&make_headers(&["ozon", "max", " ozon"]));
        assert_eq!(cm.index("ozon"), Some(0));
    }

    #[test]
    fn test_resolve_columns_any_order() {
        let headers = make_headers(&[
            "nitrogen_dioksida",
            "ozon",
            "tanggal",
            "karbon_monoksida",
            "sulfur_dioksida",
            "pm_duakomalima",
            "pm_sepuluh",
        ]);
        let layout = resolve_columns(&ColumnMap::from_headers(&headers)).unwrap();
        assert_eq!(layout.features, [6, 5, 4, 3, 1, 0]);
        assert_eq!(layout.actual, None);
    }

    #[test]
    fn test_resolve_columns_with_actual() {
        let mut cols = FEATURE_COLUMNS.to_vec();
        cols.push("max");
        let layout = resolve_columns(&ColumnMap::from_headers(&make_headers(&cols))).unwrap();
        assert_eq!(layout.features, [0, 1, 2, 3, 4, 5]);
        assert_eq!(layout.actual, Some(6));
    }

    #[test]
    fn test_resolve_columns_missing_required() {
        let headers = make_headers(&["pm_sepuluh", "pm_duakomalima", "max"]);
        let err = resolve_columns(&ColumnMap::from_headers(&headers)).unwrap_err();
        match err {
            AppError::MissingColumns(cols) => {
                assert_eq!(cols.len(), 4);
                assert!(cols.contains(&"ozon".to_string()));
                assert!(cols.contains(&"nitrogen_dioksida".to_string()));
            }
            _ => panic!("Expected MissingColumns error"),
        }
    }
}
