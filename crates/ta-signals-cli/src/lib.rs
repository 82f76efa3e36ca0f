//! ta-signals-cli: command-line front end for the ta-signals crate.
//!
//! Reads OHLCV bars from CSV, runs one analysis and writes CSV or JSON.
//! The modules are public so the integration tests and other front ends can
//! reuse the parsing and output code.

pub mod args;
pub mod commands;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;

pub use error::{CliError, Result};
