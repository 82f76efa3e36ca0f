//! CSV parsing of OHLCV bars.
//!
//! Columns are matched by header name, case-insensitive and trimmed:
//! - `timestamp`, `time`, `date`, `datetime`, `dt` for the bar time, as an
//!   integer epoch value
//! - `open`, `high`, `low`, `close` (or `price`) for prices
//! - `volume` or `vol`, optional; a missing volume column reads as zero
//!
//! Other columns are ignored. The parsed rows go through
//! [`BarTable::from_columns`], so the table invariants are checked there.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use ta_signals::bars::BarTable;

use crate::error::{CliError, Result};

/// Header positions of the detected columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Timestamp column.
    pub timestamp: usize,
    /// Open column.
    pub open: usize,
    /// High column.
    pub high: usize,
    /// Low column.
    pub low: usize,
    /// Close column.
    pub close: usize,
    /// Volume column, if present.
    pub volume: Option<usize>,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn is_timestamp_column(normalized: &str) -> bool {
    matches!(
        normalized,
        "timestamp" | "time" | "date" | "datetime" | "dt"
    )
}

fn find(headers: &[String], accept: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(|h| accept(h.as_str()))
}

fn require(headers: &[String], name: &str, accept: impl Fn(&str) -> bool) -> Result<usize> {
    find(headers, accept).ok_or_else(|| CliError::CsvParseError {
        message: format!("missing '{name}' column"),
        line: Some(1),
    })
}

impl ColumnLayout {
    /// Detects the bar columns from a header row.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CsvParseError` naming the first required column
    /// that is absent.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let headers: Vec<String> = headers.into_iter().map(normalize_header).collect();
        Ok(Self {
            timestamp: require(&headers, "timestamp", is_timestamp_column)?,
            open: require(&headers, "open", |h| h == "open")?,
            high: require(&headers, "high", |h| h == "high")?,
            low: require(&headers, "low", |h| h == "low")?,
            close: require(&headers, "close", |h| h == "close" || h == "price")?,
            volume: find(&headers, |h| h == "volume" || h == "vol"),
        })
    }
}

fn cell<'r>(record: &'r csv::StringRecord, idx: usize, name: &str, line: usize) -> Result<&'r str> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| CliError::CsvParseError {
            message: format!("row has no '{name}' value"),
            line: Some(line),
        })
}

fn parse_price(value: &str, name: &str, line: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|_| CliError::CsvParseError {
        message: format!("cannot parse '{value}' as {name}"),
        line: Some(line),
    })
}

fn parse_timestamp(value: &str, line: usize) -> Result<i64> {
    value.parse::<i64>().map_err(|_| CliError::CsvParseError {
        message: format!("cannot parse '{value}' as an integer timestamp"),
        line: Some(line),
    })
}

/// Parses a CSV file of bars.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be opened,
/// `CliError::CsvParseError` for a malformed file and
/// `CliError::SignalError` if the rows break a bar table invariant.
pub fn parse_bars<P: AsRef<Path>>(path: P) -> Result<BarTable<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    parse_bars_from_reader(BufReader::new(file))
}

/// Parses bars from any reader.
///
/// # Errors
///
/// Same as [`parse_bars`], minus the file error.
pub fn parse_bars_from_reader<R: Read>(reader: R) -> Result<BarTable<f64>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| CliError::CsvParseError {
        message: e.to_string(),
        line: Some(1),
    })?;
    let layout = ColumnLayout::detect(headers.iter())?;

    let mut timestamps = Vec::new();
    let mut open = Vec::new();
    let mut high = Vec::new();
    let mut low = Vec::new();
    let mut close = Vec::new();
    let mut volume = Vec::new();

    for (line_idx, result) in csv_reader.records().enumerate() {
        // +2 for the header and 0-indexing
        let line = line_idx + 2;
        let record = result.map_err(|e| CliError::CsvParseError {
            message: e.to_string(),
            line: Some(line),
        })?;

        timestamps.push(parse_timestamp(
            cell(&record, layout.timestamp, "timestamp", line)?,
            line,
        )?);
        open.push(parse_price(cell(&record, layout.open, "open", line)?, "open", line)?);
        high.push(parse_price(cell(&record, layout.high, "high", line)?, "high", line)?);
        low.push(parse_price(cell(&record, layout.low, "low", line)?, "low", line)?);
        close.push(parse_price(
            cell(&record, layout.close, "close", line)?,
            "close",
            line,
        )?);
        volume.push(match layout.volume {
            Some(idx) => parse_price(cell(&record, idx, "volume", line)?, "volume", line)?,
            None => 0.0,
        });
    }

    if timestamps.is_empty() {
        return Err(CliError::CsvParseError {
            message: "no data rows".to_string(),
            line: None,
        });
    }

    tracing::debug!(rows = timestamps.len(), "parsed bars");
    Ok(BarTable::from_columns(
        timestamps, open, high, low, close, volume,
    )?)
}
