use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Strict alignment was requested and the two tables have no date in common.
    #[error(
        "Asset and benchmark returns share no dates ({asset_rows} asset rows, {benchmark_rows} benchmark rows)"
    )]
    Alignment {
        asset_rows: usize,
        benchmark_rows: usize,
    },

    #[error("Benchmark table must have exactly one column, found {0}")]
    BenchmarkShape(usize),

    #[error("Error in calculation: {0}")]
    Core(#[from] CoreError),
}
