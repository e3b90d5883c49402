use crate::error::CoreError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// A table of daily returns: the first row of every column is NaN.
pub type ReturnSeries = TimeSeriesTable;

/// A table of asset returns minus benchmark returns, one column per asset.
pub type ExcessReturnSeries = TimeSeriesTable;

/// A single named series of values, one per date of the owning table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the values that are not NaN, in date order.
    pub fn defined(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|v| !v.is_nan())
    }

    pub fn defined_count(&self) -> usize {
        self.defined().count()
    }
}

/// An immutable, date-indexed table of `f64` columns.
///
/// Dates are unique and strictly ascending, every column has exactly one value
/// per date, and column names are unique. Column order is the order given at
/// construction and is never changed by any operation on the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeSeriesTable {
    /// Builds a table, validating the index and column invariants.
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<Column>) -> Result<Self, CoreError> {
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(CoreError::InvalidInput(
                "dates".to_string(),
                format!("index is not strictly ascending at {} -> {}", pair[0], pair[1]),
            ));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.is_empty() {
                return Err(CoreError::InvalidInput(
                    "columns".to_string(),
                    "column names must not be empty".to_string(),
                ));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(CoreError::InvalidInput(
                    "columns".to_string(),
                    format!("duplicate column '{}'", column.name),
                ));
            }
            if column.values.len() != dates.len() {
                return Err(CoreError::InvalidInput(
                    column.name.clone(),
                    format!(
                        "expected {} values, found {}",
                        dates.len(),
                        column.values.len()
                    ),
                ));
            }
        }

        Ok(Self { dates, columns })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Returns a single-column table holding only `name`.
    pub fn select(&self, name: &str) -> Result<Self, CoreError> {
        let column = self
            .column(name)
            .ok_or_else(|| CoreError::UnknownSeries(name.to_string()))?;
        Ok(Self {
            dates: self.dates.clone(),
            columns: vec![column.clone()],
        })
    }

    /// Number of rows (dates).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Row index of `date`, if present.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Produces a new table with the same index and column names, each column's
    /// values replaced by `f(values)`.
    ///
    /// # Panics
    ///
    /// Panics if `f` returns a vector whose length differs from the row count.
    pub fn map_columns<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = f(&c.values);
                assert_eq!(values.len(), self.dates.len(), "column length changed");
                Column::new(c.name.clone(), values)
            })
            .collect();
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }
}
