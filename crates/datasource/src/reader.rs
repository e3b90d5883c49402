use crate::error::DataError;
use chrono::NaiveDate;
use core_types::{Column, TimeSeriesTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Tokens treated as a missing field, in addition to the empty string.
const MISSING_TOKENS: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// How the date index of a CSV file is located and parsed.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub date_column: String,
    pub date_format: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            date_column: "Date".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Reads a price table from a CSV file on disk.
pub fn read_data(path: &Path, options: &LoaderOptions) -> Result<TimeSeriesTable, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_data_from_reader(file, options)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = ?table.column_names(),
        "Loaded price table"
    );
    Ok(table)
}

/// Reads a price table from CSV text.
///
/// The header row must contain `options.date_column`; every other column is
/// parsed as a number. Rows with any missing field are dropped, and the result
/// is sorted by date. A repeated date is an error.
pub fn read_data_from_reader<R: Read>(
    reader: R,
    options: &LoaderOptions,
) -> Result<TimeSeriesTable, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h == options.date_column)
        .ok_or_else(|| DataError::MalformedInput {
            line: 1,
            reason: format!("missing date column '{}'", options.date_column),
        })?;

    let value_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != date_idx)
        .collect();
    if value_columns.is_empty() {
        return Err(DataError::MalformedInput {
            line: 1,
            reason: "no value columns besides the date column".to_string(),
        });
    }

    let mut rows: Vec<(NaiveDate, Vec<f64>)> = Vec::new();
    let mut dropped = 0usize;

    for record in csv_reader.records() {
        let record = record.map_err(record_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw_date = record.get(date_idx).unwrap_or_default();
        if is_missing(raw_date) {
            dropped += 1;
            continue;
        }
        let date = NaiveDate::parse_from_str(raw_date, &options.date_format).map_err(|e| {
            DataError::MalformedInput {
                line,
                reason: format!(
                    "'{raw_date}' does not match date format '{}': {e}",
                    options.date_format
                ),
            }
        })?;

        let mut values = Vec::with_capacity(value_columns.len());
        let mut has_missing = false;
        for &(idx, name) in &value_columns {
            let raw = record.get(idx).unwrap_or_default();
            if is_missing(raw) {
                has_missing = true;
                continue;
            }
            let value = raw.parse::<f64>().map_err(|_| DataError::MalformedInput {
                line,
                reason: format!("column '{name}': '{raw}' is not a number"),
            })?;
            // `f64` parsing accepts spellings like `NAN` or `-nan`.
            if value.is_nan() {
                has_missing = true;
                continue;
            }
            values.push(value);
        }

        if has_missing {
            dropped += 1;
            continue;
        }
        rows.push((date, values));
    }

    if dropped > 0 {
        tracing::warn!(dropped, "Dropped rows with missing fields");
    }

    rows.sort_by_key(|(date, _)| *date);
    if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(DataError::MalformedInput {
            line: 0,
            reason: format!("date {} appears more than once", pair[0].0),
        });
    }

    let dates: Vec<NaiveDate> = rows.iter().map(|(date, _)| *date).collect();
    let columns = value_columns
        .iter()
        .enumerate()
        .map(|(pos, &(_, name))| Column::new(name, rows.iter().map(|(_, v)| v[pos]).collect()))
        .collect();

    Ok(TimeSeriesTable::new(dates, columns)?)
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_TOKENS.contains(&raw)
}

/// A row with the wrong number of fields is malformed input, not a CSV failure.
fn record_error(err: csv::Error) -> DataError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return DataError::MalformedInput {
            line: pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            reason: format!("expected {expected_len} fields, found {len}"),
        };
    }
    DataError::Csv(err)
}
