use core_types::{ReturnSeries, TimeSeriesTable};

/// Converts a price table into simple daily returns, column by column.
///
/// Row `t` holds `(p[t] - p[t-1]) / p[t-1]`. The first row has no predecessor
/// and is NaN. A NaN price, or a previous price that is zero or negative, yields
/// NaN for that row rather than an infinite or misleading value.
pub fn daily_returns(prices: &TimeSeriesTable) -> ReturnSeries {
    for column in prices.columns() {
        let non_positive = column.defined().filter(|p| *p <= 0.0).count();
        if non_positive > 0 {
            tracing::warn!(
                column = column.name(),
                non_positive,
                "Non-positive prices found; affected returns will be undefined"
            );
        }
    }

    prices.map_columns(pct_change)
}

/// Percentage change between consecutive values, NaN-led.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(f64::NAN);
    out.extend(values.windows(2).map(|w| {
        let (prev, curr) = (w[0], w[1]);
        if prev > 0.0 {
            (curr - prev) / prev
        } else {
            // Also covers NaN, since every comparison with NaN is false.
            f64::NAN
        }
    }));
    out
}
