use crate::error::AnalyticsError;
use crate::excess::{calculate_excess_returns_with, AlignmentOptions};
use crate::ratios::{
    annualise_sharpe_ratio, average_excess_return, daily_sharpe_ratio,
    standard_deviation_excess_return, TRADING_DAYS_PER_YEAR,
};
use crate::report::SharpeReport;
use crate::returns::daily_returns;
use core_types::TimeSeriesTable;

/// A stateless calculator that runs the full Sharpe pipeline over price tables.
#[derive(Debug, Clone, Copy)]
pub struct SharpeEngine {
    trading_days_per_year: u32,
    alignment: AlignmentOptions,
}

impl Default for SharpeEngine {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            alignment: AlignmentOptions::default(),
        }
    }
}

impl SharpeEngine {
    pub fn new(trading_days_per_year: u32, alignment: AlignmentOptions) -> Self {
        Self {
            trading_days_per_year,
            alignment,
        }
    }

    pub fn trading_days_per_year(&self) -> u32 {
        self.trading_days_per_year
    }

    pub fn alignment(&self) -> AlignmentOptions {
        self.alignment
    }

    /// The main entry point for calculating Sharpe ratios.
    ///
    /// # Arguments
    ///
    /// * `asset_prices` - One price column per asset.
    /// * `benchmark_prices` - A single benchmark price column.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `SharpeReport` or an `AnalyticsError`.
    pub fn calculate(
        &self,
        asset_prices: &TimeSeriesTable,
        benchmark_prices: &TimeSeriesTable,
    ) -> Result<SharpeReport, AnalyticsError> {
        if benchmark_prices.width() != 1 {
            return Err(AnalyticsError::BenchmarkShape(benchmark_prices.width()));
        }

        let asset_returns = daily_returns(asset_prices);
        let benchmark_returns = daily_returns(benchmark_prices);
        tracing::debug!(
            assets = asset_returns.width(),
            rows = asset_returns.len(),
            "Computed daily returns"
        );

        let excess_returns =
            calculate_excess_returns_with(&asset_returns, &benchmark_returns, &self.alignment)?;
        tracing::debug!(rows = excess_returns.len(), "Computed excess returns");

        let avg = average_excess_return(&excess_returns);
        let sd = standard_deviation_excess_return(&excess_returns);
        let daily = daily_sharpe_ratio(&avg, &sd);
        let annualised = annualise_sharpe_ratio(&daily, self.trading_days_per_year);

        let observations = excess_returns
            .columns()
            .iter()
            .map(|c| (c.name().to_string(), c.defined_count()))
            .collect();

        for (asset, ratio) in annualised.iter().filter(|(_, r)| r.is_nan()) {
            tracing::warn!(asset, ratio, "Sharpe ratio is undefined");
        }
        tracing::info!(
            assets = annualised.len(),
            trading_days = self.trading_days_per_year,
            "Sharpe ratios calculated"
        );

        Ok(SharpeReport {
            trading_days_per_year: self.trading_days_per_year,
            observations,
            average_excess_return: avg,
            standard_deviation_excess_return: sd,
            daily_sharpe_ratio: daily,
            annualised_sharpe_ratio: annualised,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Column;

    fn prices(columns: Vec<(&str, Vec<f64>)>) -> TimeSeriesTable {
        let n = columns[0].1.len();
        let dates = (4..4 + n as u32)
            .map(|day| NaiveDate::from_ymd_opt(2016, 1, day).unwrap())
            .collect();
        TimeSeriesTable::new(
            dates,
            columns.into_iter().map(|(n, v)| Column::new(n, v)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn reports_the_configured_period() {
        let alignment = AlignmentOptions {
            join: core_types::JoinPolicy::Inner,
            strict: true,
        };
        let engine = SharpeEngine::new(365, alignment);
        assert_eq!(engine.trading_days_per_year(), 365);
        assert_eq!(engine.alignment().join, core_types::JoinPolicy::Inner);
        assert!(engine.alignment().strict);

        let assets = prices(vec![("A", vec![100.0, 101.0, 99.0, 105.0])]);
        let bench = prices(vec![("S&P 500", vec![1000.0, 1010.0, 1005.0, 1020.0])]);
        let report = engine.calculate(&assets, &bench).unwrap();
        assert_eq!(report.trading_days_per_year, engine.trading_days_per_year());
    }

    #[test]
    fn rejects_multi_column_benchmark() {
        let engine = SharpeEngine::default();
        let assets = prices(vec![("A", vec![1.0, 2.0])]);
        let bench = prices(vec![("X", vec![1.0, 2.0]), ("Y", vec![1.0, 2.0])]);
        assert!(matches!(
            engine.calculate(&assets, &bench),
            Err(AnalyticsError::BenchmarkShape(2))
        ));
    }

    #[test]
    fn counts_defined_observations_and_flags_flat_assets() {
        let engine = SharpeEngine::default();
        // "Flat" moves exactly with the benchmark, so its excess return is constant.
        let assets = prices(vec![
            ("Flat", vec![100.0, 200.0, 400.0, 800.0]),
            ("Mover", vec![10.0, 11.0, 10.5, 12.0]),
        ]);
        let bench = prices(vec![("S&P 500", vec![1.0, 2.0, 4.0, 8.0])]);

        let report = engine.calculate(&assets, &bench).unwrap();
        assert_eq!(report.trading_days_per_year, 252);
        assert_eq!(report.observations_for("Mover"), Some(3));
        assert_eq!(report.standard_deviation_excess_return.get("Flat"), Some(0.0));
        assert!(report.annualised_sharpe_ratio.get("Flat").unwrap().is_nan());
        assert!(report.annualised_sharpe_ratio.get("Mover").unwrap().is_finite());
        assert_eq!(report.assets().collect::<Vec<_>>(), vec!["Flat", "Mover"]);
    }
}
