//! Per-asset reductions of an excess-return table into Sharpe ratios.
//!
//! Every reduction skips NaN values instead of treating them as zero. A column
//! with no usable values reduces to NaN.

use core_types::{ExcessReturnSeries, PerAssetStatistic};

pub use core_types::TRADING_DAYS_PER_YEAR;

/// Decimal places kept by [`annualise_sharpe_ratio`].
pub const ANNUALISED_DECIMALS: u32 = 2;

/// Running count, mean and sum of squared deviations (Welford).
///
/// A constant input yields exactly that constant as mean and exactly zero
/// variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningMoments {
    /// Accumulates every non-NaN value of `values`.
    pub fn from_defined<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut moments = Self::default();
        for value in values.into_iter().filter(|v| !v.is_nan()) {
            moments.push(value);
        }
        moments
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean, NaN when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 { f64::NAN } else { self.mean }
    }

    /// Sample standard deviation (N - 1), NaN with fewer than two values.
    pub fn sample_std(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        (self.m2 / (self.count - 1) as f64).sqrt()
    }
}

/// Mean of the defined excess returns of each asset.
pub fn average_excess_return(excess_returns: &ExcessReturnSeries) -> PerAssetStatistic {
    excess_returns
        .columns()
        .iter()
        .map(|c| {
            let moments = RunningMoments::from_defined(c.values().iter().copied());
            (c.name().to_string(), moments.mean())
        })
        .collect()
}

/// Sample standard deviation of the defined excess returns of each asset.
pub fn standard_deviation_excess_return(excess_returns: &ExcessReturnSeries) -> PerAssetStatistic {
    excess_returns
        .columns()
        .iter()
        .map(|c| {
            let moments = RunningMoments::from_defined(c.values().iter().copied());
            (c.name().to_string(), moments.sample_std())
        })
        .collect()
}

/// Mean excess return divided by its standard deviation, per asset.
///
/// Assets are matched by name and emitted in the order of `avg_excess_return`.
/// A zero, NaN or missing standard deviation gives NaN, never an infinity.
pub fn daily_sharpe_ratio(
    avg_excess_return: &PerAssetStatistic,
    sd_excess_return: &PerAssetStatistic,
) -> PerAssetStatistic {
    avg_excess_return
        .iter()
        .map(|(asset, avg)| {
            let ratio = match sd_excess_return.get(asset) {
                Some(sd) if sd != 0.0 && !sd.is_nan() => avg / sd,
                _ => f64::NAN,
            };
            (asset.to_string(), ratio)
        })
        .collect()
}

/// Square root of the annualisation period.
pub fn annualisation_factor(trading_days_per_year: u32) -> f64 {
    f64::from(trading_days_per_year).sqrt()
}

/// Scales daily ratios by `sqrt(trading_days_per_year)` and rounds them to
/// [`ANNUALISED_DECIMALS`] places.
pub fn annualise_sharpe_ratio(
    daily_sharpe_ratio: &PerAssetStatistic,
    trading_days_per_year: u32,
) -> PerAssetStatistic {
    let factor = annualisation_factor(trading_days_per_year);
    daily_sharpe_ratio.map(|daily| round_to(daily * factor, ANNUALISED_DECIMALS))
}

/// Rounds to `decimals` places, ties to even. NaN and infinities pass through.
///
/// Values that round to zero come back as `+0.0`, never `-0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale + 0.0
}
