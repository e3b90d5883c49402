//! # Data Source Crate
//!
//! Turns CSV price files into the date-indexed tables the analytics pipeline
//! works on.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All file-format knowledge lives here. The rest of the workspace
//!   only ever sees a validated `TimeSeriesTable`.
//! - **Clean Tables Only:** Rows with a missing field are dropped and the result is
//!   sorted by date, so downstream stages can rely on a complete, ordered index.
//!
//! ## Public API
//!
//! - `read_data`: Load a table from a file path.
//! - `read_data_from_reader`: Load a table from any `std::io::Read`.
//! - `LoaderOptions`: Name and format of the date column.
//! - `DataError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod reader;

// Re-export the key components to create a clean, public-facing API.
pub use error::DataError;
pub use reader::{read_data, read_data_from_reader, LoaderOptions};
