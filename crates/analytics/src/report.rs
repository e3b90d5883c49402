use core_types::PerAssetStatistic;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// The output of one `SharpeEngine` run.
///
/// Every per-asset mapping keeps the column order of the input price table.
/// The annualised ratios are already rounded; the other statistics keep full
/// precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharpeReport {
    /// Annualisation period the ratios were scaled with.
    pub trading_days_per_year: u32,
    /// Number of defined excess-return values per asset.
    pub observations: Vec<(String, usize)>,
    pub average_excess_return: PerAssetStatistic,
    pub standard_deviation_excess_return: PerAssetStatistic,
    pub daily_sharpe_ratio: PerAssetStatistic,
    pub annualised_sharpe_ratio: PerAssetStatistic,
}

/// One asset's figures, rounded for display. `None` marks an undefined value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRow {
    pub asset: String,
    pub observations: usize,
    pub mean_excess_return: Option<Decimal>,
    pub std_excess_return: Option<Decimal>,
    pub daily_sharpe_ratio: Option<Decimal>,
    pub annualised_sharpe_ratio: Option<Decimal>,
}

impl SharpeReport {
    pub fn assets(&self) -> impl Iterator<Item = &str> {
        self.annualised_sharpe_ratio.names()
    }

    pub fn observations_for(&self, asset: &str) -> Option<usize> {
        self.observations
            .iter()
            .find(|(name, _)| name == asset)
            .map(|(_, n)| *n)
    }

    /// Presentation rows, one per asset in column order.
    pub fn rows(&self) -> Vec<AssetRow> {
        self.assets()
            .map(|asset| AssetRow {
                asset: asset.to_string(),
                observations: self.observations_for(asset).unwrap_or_default(),
                mean_excess_return: to_decimal(self.average_excess_return.get(asset), 6),
                std_excess_return: to_decimal(self.standard_deviation_excess_return.get(asset), 6),
                daily_sharpe_ratio: to_decimal(self.daily_sharpe_ratio.get(asset), 4),
                annualised_sharpe_ratio: to_decimal(self.annualised_sharpe_ratio.get(asset), 2),
            })
            .collect()
    }
}

/// Converts a finite value to a `Decimal` rounded to `dp` places (banker's rounding).
fn to_decimal(value: Option<f64>, dp: u32) -> Option<Decimal> {
    value
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64)
        .map(|d| d.round_dp(dp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn stat(values: &[(&str, f64)]) -> PerAssetStatistic {
        values.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn rows_follow_column_order_and_mark_undefined() {
        let report = SharpeReport {
            trading_days_per_year: 252,
            observations: vec![("AMZN".to_string(), 251), ("FB".to_string(), 1)],
            average_excess_return: stat(&[("AMZN", 0.000822), ("FB", 0.0005)]),
            standard_deviation_excess_return: stat(&[("AMZN", 0.0157), ("FB", f64::NAN)]),
            daily_sharpe_ratio: stat(&[("AMZN", 0.052357), ("FB", f64::NAN)]),
            annualised_sharpe_ratio: stat(&[("AMZN", 0.83), ("FB", f64::NAN)]),
        };

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].asset, "AMZN");
        assert_eq!(rows[0].observations, 251);
        assert_eq!(rows[0].annualised_sharpe_ratio, Some(Decimal::from_str("0.83").unwrap()));
        assert_eq!(rows[0].daily_sharpe_ratio, Some(Decimal::from_str("0.0524").unwrap()));
        assert_eq!(rows[1].std_excess_return, None);
        assert_eq!(rows[1].annualised_sharpe_ratio, None);
    }
}
