//! # Core Types
//!
//! The shared vocabulary of the workspace: the date-indexed numeric table every
//! pipeline stage consumes and produces, the per-asset scalar mapping the
//! reductions emit, and the small enums used to configure alignment.
//!
//! NaN is the single "undefined" marker. Nothing in this crate replaces it with
//! zero; callers decide how to treat it.

pub mod enums;
pub mod error;
pub mod statistic;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::JoinPolicy;
pub use error::CoreError;
pub use statistic::PerAssetStatistic;
pub use table::{Column, ExcessReturnSeries, ReturnSeries, TimeSeriesTable};

/// Trading days in a year. Daily Sharpe ratios are annualised by `sqrt` of this.
///
/// A fixed policy for daily equity data, not derived from the input. Callers
/// may annualise over a different period.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;
