use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{Column, ExcessReturnSeries, JoinPolicy, ReturnSeries, TimeSeriesTable};
use serde::{Deserialize, Serialize};

/// How asset and benchmark returns are lined up before subtracting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentOptions {
    pub join: JoinPolicy,
    /// Fail with [`AnalyticsError::Alignment`] when no date is shared, instead
    /// of returning an all-NaN table.
    pub strict: bool,
}

/// Subtracts the benchmark's returns from every asset column, aligned by date
/// with an outer join.
pub fn calculate_excess_returns(
    asset_returns: &ReturnSeries,
    benchmark_returns: &ReturnSeries,
) -> Result<ExcessReturnSeries, AnalyticsError> {
    calculate_excess_returns_with(asset_returns, benchmark_returns, &AlignmentOptions::default())
}

/// Subtracts the benchmark's returns from every asset column using `options`.
///
/// `benchmark_returns` must hold exactly one column. For each date of the
/// aligned index, `excess = asset - benchmark`; a side missing on that date, or
/// a NaN on either side, gives NaN.
pub fn calculate_excess_returns_with(
    asset_returns: &ReturnSeries,
    benchmark_returns: &ReturnSeries,
    options: &AlignmentOptions,
) -> Result<ExcessReturnSeries, AnalyticsError> {
    let benchmark = match benchmark_returns.columns() {
        [single] => single,
        other => return Err(AnalyticsError::BenchmarkShape(other.len())),
    };

    let shared = asset_returns
        .dates()
        .iter()
        .filter(|d| benchmark_returns.position_of(**d).is_some())
        .count();
    if shared == 0 {
        if options.strict {
            return Err(AnalyticsError::Alignment {
                asset_rows: asset_returns.len(),
                benchmark_rows: benchmark_returns.len(),
            });
        }
        tracing::warn!(
            benchmark = benchmark.name(),
            "Asset and benchmark returns share no dates; excess returns are all undefined"
        );
    } else if shared < asset_returns.len().max(benchmark_returns.len()) {
        tracing::debug!(
            shared,
            asset_rows = asset_returns.len(),
            benchmark_rows = benchmark_returns.len(),
            join = %options.join,
            "Return series cover different dates"
        );
    }

    let dates = aligned_index(asset_returns.dates(), benchmark_returns.dates(), options.join);
    let asset_rows: Vec<Option<usize>> = dates.iter().map(|d| asset_returns.position_of(*d)).collect();
    let benchmark_values: Vec<f64> = dates
        .iter()
        .map(|d| value_at(benchmark, benchmark_returns.position_of(*d)))
        .collect();

    let columns = asset_returns
        .columns()
        .iter()
        .map(|column| {
            let values = asset_rows
                .iter()
                .zip(&benchmark_values)
                .map(|(row, bench)| value_at(column, *row) - bench)
                .collect();
            Column::new(column.name(), values)
        })
        .collect();

    Ok(TimeSeriesTable::new(dates, columns)?)
}

fn value_at(column: &Column, row: Option<usize>) -> f64 {
    row.map_or(f64::NAN, |i| column.values()[i])
}

/// Builds the date index both tables are projected onto. Inputs are sorted and
/// unique, and so is the result.
fn aligned_index(left: &[NaiveDate], right: &[NaiveDate], join: JoinPolicy) -> Vec<NaiveDate> {
    match join {
        JoinPolicy::Left => left.to_vec(),
        JoinPolicy::Inner => left
            .iter()
            .copied()
            .filter(|d| right.binary_search(d).is_ok())
            .collect(),
        JoinPolicy::Outer => {
            let mut merged = Vec::with_capacity(left.len().max(right.len()));
            let (mut i, mut j) = (0, 0);
            while i < left.len() && j < right.len() {
                match left[i].cmp(&right[j]) {
                    std::cmp::Ordering::Less => {
                        merged.push(left[i]);
                        i += 1;
                    }
                    std::cmp::Ordering::Greater => {
                        merged.push(right[j]);
                        j += 1;
                    }
                    std::cmp::Ordering::Equal => {
                        merged.push(left[i]);
                        i += 1;
                        j += 1;
                    }
                }
            }
            merged.extend_from_slice(&left[i..]);
            merged.extend_from_slice(&right[j..]);
            merged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, day).unwrap()
    }

    fn series(days: &[u32], columns: &[(&str, Vec<f64>)]) -> TimeSeriesTable {
        TimeSeriesTable::new(
            days.iter().map(|day| d(*day)).collect(),
            columns
                .iter()
                .map(|(name, values)| Column::new(*name, values.clone()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn subtracts_benchmark_from_each_asset() {
        let assets = series(
            &[4, 5, 6],
            &[("A", vec![f64::NAN, 0.02, -0.01]), ("B", vec![f64::NAN, 0.01, 0.03])],
        );
        let bench = series(&[4, 5, 6], &[("S&P 500", vec![f64::NAN, 0.005, 0.01])]);

        let excess = calculate_excess_returns(&assets, &bench).unwrap();
        assert_eq!(excess.column_names(), vec!["A", "B"]);
        let a = excess.column("A").unwrap().values();
        assert!(a[0].is_nan());
        assert!((a[1] - 0.015).abs() < 1e-12);
        assert!((a[2] + 0.02).abs() < 1e-12);
    }

    #[test]
    fn antisymmetric_when_swapped() {
        let a = series(&[4, 5, 6, 7], &[("X", vec![f64::NAN, 0.01, -0.02, 0.04])]);
        let b = series(&[4, 5, 6, 7], &[("Y", vec![f64::NAN, 0.03, 0.01, -0.01])]);

        let ab = calculate_excess_returns(&a, &b).unwrap();
        let ba = calculate_excess_returns(&b, &a).unwrap();
        for (x, y) in ab.columns()[0].values().iter().zip(ba.columns()[0].values()) {
            if !x.is_nan() && !y.is_nan() {
                assert_eq!(*x, -*y);
            }
        }
    }

    #[test]
    fn outer_join_unions_dates_with_nan_for_missing_side() {
        let assets = series(&[4, 5, 7], &[("A", vec![0.01, 0.02, 0.03])]);
        let bench = series(&[5, 6, 7], &[("S&P 500", vec![0.01, 0.01, 0.01])]);

        let excess = calculate_excess_returns(&assets, &bench).unwrap();
        assert_eq!(excess.dates(), &[d(4), d(5), d(6), d(7)]);
        let values = excess.column("A").unwrap().values();
        assert!(values[0].is_nan());
        assert!((values[1] - 0.01).abs() < 1e-12);
        assert!(values[2].is_nan());
        assert!((values[3] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn inner_and_left_joins() {
        let assets = series(&[4, 5, 7], &[("A", vec![0.01, 0.02, 0.03])]);
        let bench = series(&[5, 6, 7], &[("S&P 500", vec![0.01, 0.01, 0.01])]);

        let inner = AlignmentOptions { join: JoinPolicy::Inner, strict: false };
        let excess = calculate_excess_returns_with(&assets, &bench, &inner).unwrap();
        assert_eq!(excess.dates(), &[d(5), d(7)]);

        let left = AlignmentOptions { join: JoinPolicy::Left, strict: false };
        let excess = calculate_excess_returns_with(&assets, &bench, &left).unwrap();
        assert_eq!(excess.dates(), assets.dates());
        assert!(excess.column("A").unwrap().values()[0].is_nan());
    }

    #[test]
    fn disjoint_dates_are_all_nan_unless_strict() {
        let assets = series(&[4, 5], &[("A", vec![0.01, 0.02])]);
        let bench = series(&[11, 12], &[("S&P 500", vec![0.01, 0.01])]);

        let lenient = calculate_excess_returns(&assets, &bench).unwrap();
        assert_eq!(lenient.len(), 4);
        assert!(lenient.columns()[0].values().iter().all(|v| v.is_nan()));

        let strict = AlignmentOptions { join: JoinPolicy::Outer, strict: true };
        let err = calculate_excess_returns_with(&assets, &bench, &strict).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::Alignment { asset_rows: 2, benchmark_rows: 2 }
        ));
    }

    #[test]
    fn benchmark_must_be_a_single_column() {
        let assets = series(&[4], &[("A", vec![0.01])]);
        let bench = series(&[4], &[("S&P 500", vec![0.01]), ("NASDAQ", vec![0.02])]);
        assert!(matches!(
            calculate_excess_returns(&assets, &bench),
            Err(AnalyticsError::BenchmarkShape(2))
        ));
    }
}
