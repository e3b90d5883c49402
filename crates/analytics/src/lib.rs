//! # Sharpe Analytics
//!
//! This crate turns price tables into Sharpe ratios. It is the numerical core of
//! the workspace.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O. It depends only on `core-types`.
//! - **Stateless Calculation:** Each stage takes a table by reference and returns a
//!   new one. `SharpeEngine` chains them; the individual stages are public so they
//!   can be tested and reused one at a time.
//! - **Undefined Propagates:** Division by zero, missing dates and empty columns
//!   produce NaN, never an error, so one bad asset does not abort the others.
//!
//! ## Public API
//!
//! - `daily_returns`: Price table to percentage-change table.
//! - `calculate_excess_returns`: Asset returns minus benchmark returns, aligned by date.
//! - `average_excess_return`, `standard_deviation_excess_return`, `daily_sharpe_ratio`,
//!   `annualise_sharpe_ratio`: The per-asset reductions.
//! - `describe`: Summary statistics of any table.
//! - `SharpeEngine` / `SharpeReport`: The whole pipeline and its result.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod excess;
pub mod ratios;
pub mod report;
pub mod returns;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use engine::SharpeEngine;
pub use error::AnalyticsError;
pub use excess::{calculate_excess_returns, calculate_excess_returns_with, AlignmentOptions};
pub use ratios::{
    annualisation_factor, annualise_sharpe_ratio, average_excess_return, daily_sharpe_ratio,
    round_to, standard_deviation_excess_return, RunningMoments, TRADING_DAYS_PER_YEAR,
};
pub use report::{AssetRow, SharpeReport};
pub use returns::daily_returns;
pub use summary::{describe, ColumnSummary};
