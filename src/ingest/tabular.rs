//! CSV, spreadsheet, and JSON quote ingestion.
//!
//! Tabular files are an explicit user-chosen format, so unlike the
//! PDF pipeline these errors are surfaced to the caller per file
//! rather than silently absorbed.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use thiserror::Error;

use crate::models::{QuoteRecord, DEFAULT_COINSURANCE};

/// Errors from reading a tabular quote file.
#[derive(Debug, Error)]
pub enum TabularError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Column-name synonyms mapped onto canonical field names.
/// Matched case-insensitively; unrecognized columns are ignored.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("plan_name", "plan_name"),
    ("plan", "plan_name"),
    ("name", "plan_name"),
    ("premium", "premium"),
    ("annual_premium", "premium"),
    ("deductible", "deductible"),
    ("coinsurance", "coinsurance"),
    ("coin", "coinsurance"),
    ("oop_max", "out_of_pocket_max"),
    ("out_of_pocket_max", "out_of_pocket_max"),
    ("coverage_limit", "coverage_limit"),
    ("sum_insured", "coverage_limit"),
    ("annual_benefit_max", "annual_benefit_max"),
    ("network_size", "network_size"),
    ("network", "network_size"),
];

/// Resolve a column header to its canonical field name.
fn canonical_column(header: &str) -> Option<&'static str> {
    let key = header.trim().to_lowercase();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

/// Lenient numeric parse: commas stripped, blanks and junk take the default.
fn safe_float(value: &str, default: f64) -> f64 {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return default;
    }
    cleaned.parse().unwrap_or(default)
}

/// Like `safe_float` but absent/bad values stay absent.
fn optional_float(value: Option<&String>) -> Option<f64> {
    let cleaned = value?.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Build a quote record from one row's canonical column values.
///
/// `row_number` is 1-based and only used to synthesize a plan name
/// when the row has none.
fn record_from_columns(row_number: usize, columns: &HashMap<&'static str, String>) -> QuoteRecord {
    let plan_name = columns
        .get("plan_name")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("Plan {}", row_number));

    // Coinsurance stated as a percentage becomes a fraction, same as
    // the document extraction path.
    let mut coinsurance = safe_float(
        columns.get("coinsurance").map_or("", String::as_str),
        DEFAULT_COINSURANCE,
    );
    if coinsurance > 1.0 {
        coinsurance /= 100.0;
    }

    QuoteRecord {
        plan_name,
        premium: safe_float(columns.get("premium").map_or("", String::as_str), 0.0),
        deductible: safe_float(columns.get("deductible").map_or("", String::as_str), 0.0),
        coinsurance,
        out_of_pocket_max: safe_float(columns.get("out_of_pocket_max").map_or("", String::as_str), 0.0),
        coverage_limit: optional_float(columns.get("coverage_limit")),
        annual_benefit_max: optional_float(columns.get("annual_benefit_max")),
        network_size: optional_float(columns.get("network_size")),
    }
}

/// Map raw header/row string data onto quote records.
///
/// Shared by every tabular format; the per-format readers only
/// flatten their input into strings.
pub fn records_from_rows(headers: &[String], rows: &[Vec<String>]) -> Vec<QuoteRecord> {
    let canonical: Vec<Option<&'static str>> =
        headers.iter().map(|h| canonical_column(h)).collect();

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let mut columns: HashMap<&'static str, String> = HashMap::new();
            for (field, value) in canonical.iter().copied().zip(row.iter()) {
                if let Some(field) = field {
                    columns.insert(field, value.clone());
                }
            }
            record_from_columns(i + 1, &columns)
        })
        .collect()
}

/// Read quote records from a tabular file, dispatching on extension.
///
/// Supported: `.csv`, `.xlsx`, `.xls`, `.json`. Anything else is an
/// explicit [`TabularError::UnsupportedFormat`].
pub fn read_quotes_from_path(path: &Path) -> Result<Vec<QuoteRecord>, TabularError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => read_csv(path),
        "xlsx" | "xls" => read_spreadsheet(path),
        "json" => read_json(path),
        _ => Err(TabularError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

fn read_csv(path: &Path) -> Result<Vec<QuoteRecord>, TabularError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|v| v.to_string()).collect());
    }

    Ok(records_from_rows(&headers, &rows))
}

fn read_spreadsheet(path: &Path) -> Result<Vec<QuoteRecord>, TabularError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TabularError::Invalid("workbook has no sheets".to_string()))??;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    Ok(records_from_rows(&headers, &rows))
}

fn read_json(path: &Path) -> Result<Vec<QuoteRecord>, TabularError> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    // Accept either an array of row objects or a single object
    let objects = match value {
        serde_json::Value::Array(items) => items,
        object @ serde_json::Value::Object(_) => vec![object],
        _ => {
            return Err(TabularError::Invalid(
                "expected a JSON object or array of objects".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        let serde_json::Value::Object(map) = object else {
            return Err(TabularError::Invalid(format!(
                "row {} is not a JSON object",
                i + 1
            )));
        };

        let mut columns: HashMap<&'static str, String> = HashMap::new();
        for (key, value) in map {
            if let Some(field) = canonical_column(key) {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                columns.insert(field, text);
            }
        }
        records.push(record_from_columns(i + 1, &columns));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_alias_round_trip() {
        // The same quote through different alias spellings produces
        // identical canonical values.
        let canonical = records_from_rows(
            &strings(&["plan_name", "premium", "out_of_pocket_max", "coverage_limit"]),
            &[strings(&["Gold", "1,200", "3000", "500000"])],
        );
        let aliased = records_from_rows(
            &strings(&["Plan", "Annual_Premium", "OOP_MAX", "sum_insured"]),
            &[strings(&["Gold", "1,200", "3000", "500000"])],
        );

        assert_eq!(canonical, aliased);
        assert_eq!(canonical[0].premium, 1200.0);
        assert_eq!(canonical[0].out_of_pocket_max, 3000.0);
        assert_eq!(canonical[0].coverage_limit, Some(500000.0));
    }

    #[test]
    fn test_defaults_for_missing_values() {
        let records = records_from_rows(
            &strings(&["plan", "premium", "coinsurance"]),
            &[strings(&["", "not a number", ""])],
        );

        let q = &records[0];
        assert_eq!(q.plan_name, "Plan 1");
        assert_eq!(q.premium, 0.0);
        assert_eq!(q.coinsurance, DEFAULT_COINSURANCE);
        assert_eq!(q.network_size, None);
    }

    #[test]
    fn test_unrecognized_columns_ignored() {
        let records = records_from_rows(
            &strings(&["plan", "underwriter", "premium"]),
            &[strings(&["Silver", "Acme Re", "900"])],
        );
        assert_eq!(records[0].plan_name, "Silver");
        assert_eq!(records[0].premium, 900.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_quotes_from_path(Path::new("quotes.parquet")).unwrap_err();
        assert!(matches!(err, TabularError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_read_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        std::fs::write(
            &path,
            "plan,premium,deductible,coin,network\nGold,1200,500,20,4000\nSilver,900,1000,,2000\n",
        )
        .unwrap();

        let records = read_quotes_from_path(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].plan_name, "Gold");
        assert_eq!(records[0].coinsurance, 0.2);
        assert_eq!(records[1].coinsurance, DEFAULT_COINSURANCE);
        assert_eq!(records[1].network_size, Some(2000.0));
    }

    #[test]
    fn test_read_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotes.json");
        std::fs::write(
            &path,
            r#"[{"name": "Gold", "premium": 1200, "sum_insured": "750,000"},
                {"premium": 900}]"#,
        )
        .unwrap();

        let records = read_quotes_from_path(&path).unwrap();
        assert_eq!(records[0].plan_name, "Gold");
        assert_eq!(records[0].coverage_limit, Some(750000.0));
        assert_eq!(records[1].plan_name, "Plan 2");
        assert_eq!(records[1].premium, 900.0);
    }

    #[test]
    fn test_read_json_single_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        std::fs::write(&path, r#"{"plan": "Solo", "premium": "450"}"#).unwrap();

        let records = read_quotes_from_path(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].plan_name, "Solo");
        assert_eq!(records[0].premium, 450.0);
    }
}
