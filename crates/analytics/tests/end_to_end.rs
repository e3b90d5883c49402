//! The four-day, two-asset scenario worked out by hand.
//!
//! Asset A: 100, 101, 99, 105. Asset B: 50, 51, 52, 53.
//! Benchmark: 1000, 1010, 1005, 1020.

use analytics::{
    annualise_sharpe_ratio, average_excess_return, calculate_excess_returns, daily_returns,
    daily_sharpe_ratio, standard_deviation_excess_return, SharpeEngine, TRADING_DAYS_PER_YEAR,
};
use chrono::NaiveDate;
use core_types::{Column, TimeSeriesTable};

const TOLERANCE: f64 = 1e-9;

fn dates() -> Vec<NaiveDate> {
    [4, 5, 6, 7]
        .iter()
        .map(|day| NaiveDate::from_ymd_opt(2016, 1, *day).unwrap())
        .collect()
}

fn stocks() -> TimeSeriesTable {
    TimeSeriesTable::new(
        dates(),
        vec![
            Column::new("A", vec![100.0, 101.0, 99.0, 105.0]),
            Column::new("B", vec![50.0, 51.0, 52.0, 53.0]),
        ],
    )
    .unwrap()
}

fn benchmark() -> TimeSeriesTable {
    TimeSeriesTable::new(
        dates(),
        vec![Column::new("S&P 500", vec![1000.0, 1010.0, 1005.0, 1020.0])],
    )
    .unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn stage_by_stage_matches_hand_calculation() {
    let stock_returns = daily_returns(&stocks());
    let bench_returns = daily_returns(&benchmark());

    let a = stock_returns.column("A").unwrap().values();
    assert!(a[0].is_nan());
    assert_close(a[1], 0.01);
    assert_close(a[2], -2.0 / 101.0);
    assert_close(a[3], 6.0 / 99.0);

    let m = bench_returns.columns()[0].values();
    assert_close(m[1], 0.01);
    assert_close(m[2], -5.0 / 1010.0);
    assert_close(m[3], 15.0 / 1005.0);

    let excess = calculate_excess_returns(&stock_returns, &bench_returns).unwrap();
    assert_eq!(excess.len(), 4);
    let ea = excess.column("A").unwrap().values();
    assert!(ea[0].is_nan());
    assert_close(ea[1], 0.0);
    assert_close(ea[2], -2.0 / 101.0 + 5.0 / 1010.0);
    assert_close(ea[3], 6.0 / 99.0 - 15.0 / 1005.0);
    let eb = excess.column("B").unwrap().values();
    assert_close(eb[1], 0.01);
    assert_close(eb[2], 1.0 / 51.0 + 5.0 / 1010.0);
    assert_close(eb[3], 1.0 / 52.0 - 15.0 / 1005.0);

    let avg = average_excess_return(&excess);
    assert_close(avg.get("A").unwrap(), 0.0102764007744058);
    assert_close(avg.get("B").unwrap(), 0.012954578094400242);

    let sd = standard_deviation_excess_return(&excess);
    assert_close(sd.get("A").unwrap(), 0.031547413367644016);
    assert_close(sd.get("B").unwrap(), 0.010444738609241777);

    let daily = daily_sharpe_ratio(&avg, &sd);
    assert_close(daily.get("A").unwrap(), 0.3257446388598562);
    assert_close(daily.get("B").unwrap(), 1.2402970125971073);

    let annual = annualise_sharpe_ratio(&daily, TRADING_DAYS_PER_YEAR);
    assert_eq!(annual.get("A"), Some(5.17));
    assert_eq!(annual.get("B"), Some(19.69));
}

#[test]
fn engine_produces_the_same_report() {
    let report = SharpeEngine::default()
        .calculate(&stocks(), &benchmark())
        .unwrap();

    assert_eq!(report.assets().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(report.observations_for("A"), Some(3));
    assert_close(report.daily_sharpe_ratio.get("B").unwrap(), 1.2402970125971073);
    assert_eq!(report.annualised_sharpe_ratio.get("A"), Some(5.17));
    assert_eq!(report.annualised_sharpe_ratio.get("B"), Some(19.69));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["annualised_sharpe_ratio"]["B"], 19.69);
    assert_eq!(json["trading_days_per_year"], 252);
}
