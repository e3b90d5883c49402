use crate::ratios::RunningMoments;
use core_types::TimeSeriesTable;
use serde::Serialize;

/// Descriptive statistics of one column, NaN values excluded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Count, mean, sample standard deviation, min, quartiles and max of every
/// column, in column order. Quartiles interpolate linearly between ranks.
pub fn describe(table: &TimeSeriesTable) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|column| {
            let mut sorted: Vec<f64> = column.defined().collect();
            sorted.sort_by(f64::total_cmp);
            let moments = RunningMoments::from_defined(sorted.iter().copied());

            ColumnSummary {
                name: column.name().to_string(),
                count: sorted.len(),
                mean: moments.mean(),
                std: moments.sample_std(),
                min: sorted.first().copied().unwrap_or(f64::NAN),
                p25: quantile(&sorted, 0.25),
                median: quantile(&sorted, 0.5),
                p75: quantile(&sorted, 0.75),
                max: sorted.last().copied().unwrap_or(f64::NAN),
            }
        })
        .collect()
}

/// Linear-interpolation quantile of an ascending, NaN-free slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Column;

    fn table(values: Vec<f64>) -> TimeSeriesTable {
        let dates = (1..=values.len() as u32)
            .map(|day| NaiveDate::from_ymd_opt(2016, 3, day).unwrap())
            .collect();
        TimeSeriesTable::new(dates, vec![Column::new("A", values)]).unwrap()
    }

    #[test]
    fn describes_with_linear_quartiles() {
        let summary = &describe(&table(vec![4.0, 1.0, f64::NAN, 3.0, 2.0]))[0];
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
        assert_eq!(summary.p25, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.p75, 3.25);
        assert!((summary.std - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn all_nan_column_is_undefined() {
        let summary = &describe(&table(vec![f64::NAN, f64::NAN]))[0];
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.min.is_nan());
        assert!(summary.median.is_nan());
    }
}
