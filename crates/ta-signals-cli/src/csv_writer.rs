//! Output writers for indicator columns, levels, patterns, zones and reports.
//!
//! Indicator output drops the leading lookback rows and writes any remaining
//! NaN as an empty cell. Every row carries the bar timestamp it belongs to.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use serde::Serialize;
use ta_signals::error::LevelSide;
use ta_signals::levels::PriceLevel;
use ta_signals::patterns::PatternEvent;
use ta_signals::zones::Zone;

use crate::error::{CliError, Result};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// Destination for an optional `-o` path.
    #[must_use]
    pub fn from_path(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IoError` with the path if the file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::IoError {
                    source: e,
                    path: Some(path.clone()),
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

fn write_cell(writer: &mut dyn Write, value: f64) -> io::Result<()> {
    if value.is_nan() {
        Ok(())
    } else {
        write!(writer, "{value}")
    }
}

/// Writes named indicator columns aligned to their timestamps.
///
/// All columns share the same lookback offset.
///
/// # Errors
///
/// Returns `CliError::IoError` on a write failure.
pub fn write_multi_output(
    columns: &[(&str, &[f64])],
    timestamps: &[i64],
    lookback: usize,
    writer: &mut dyn Write,
) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }

    write!(writer, "timestamp")?;
    for (header, _) in columns {
        write!(writer, ",{header}")?;
    }
    writeln!(writer)?;

    let rows = columns.iter().map(|(_, v)| v.len()).min().unwrap_or(0);
    for i in lookback..rows {
        if let Some(ts) = timestamps.get(i) {
            write!(writer, "{ts}")?;
        }
        for (_, values) in columns {
            write!(writer, ",")?;
            write_cell(writer, values[i])?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `side,level,touches` rows.
///
/// # Errors
///
/// Returns `CliError::IoError` on a write failure.
pub fn write_levels(
    levels: &[(LevelSide, PriceLevel<f64>)],
    writer: &mut dyn Write,
) -> Result<()> {
    writeln!(writer, "side,level,touches")?;
    for (side, level) in levels {
        writeln!(writer, "{side},{},{}", level.price, level.touches)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `timestamp,pattern` rows.
///
/// # Errors
///
/// Returns `CliError::IoError` on a write failure.
pub fn write_patterns(events: &[PatternEvent], writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "timestamp,pattern")?;
    for event in events {
        writeln!(writer, "{},{}", event.timestamp, event.label)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one row per zone.
///
/// # Errors
///
/// Returns `CliError::IoError` on a write failure.
pub fn write_zones(zones: &[Zone<f64>], writer: &mut dyn Write) -> Result<()> {
    writeln!(
        writer,
        "kind,start_index,end_index,start_timestamp,end_timestamp,low,high"
    )?;
    for zone in zones {
        writeln!(
            writer,
            "{},{},{},{},{},{},{}",
            zone.kind,
            zone.start_index,
            zone.end_index,
            zone.start_timestamp,
            zone.end_timestamp,
            zone.low,
            zone.high
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns `CliError::JsonError` if serialization fails and
/// `CliError::IoError` on a write failure.
pub fn write_json<S: Serialize>(value: &S, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use ta_signals::patterns::PatternLabel;
    use ta_signals::zones::ZoneKind;

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buf: Vec<u8> = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_multi_output_drops_lookback_and_blanks_nan() {
        let a = [f64::NAN, f64::NAN, 1.5, 2.5];
        let b = [f64::NAN, f64::NAN, f64::NAN, 4.0];
        let columns = [("a", a.as_slice()), ("b", b.as_slice())];
        let out = render(|w| write_multi_output(&columns, &[10, 20, 30, 40], 2, w));
        assert_eq!(out, "timestamp,a,b\n30,1.5,\n40,2.5,4\n");
    }

    #[test]
    fn test_multi_output_empty_columns() {
        let out = render(|w| write_multi_output(&[], &[1, 2], 0, w));
        assert!(out.is_empty());
    }

    #[test]
    fn test_levels_rows() {
        let levels = [
            (
                LevelSide::Support,
                PriceLevel {
                    price: 100.0,
                    touches: 4,
                },
            ),
            (
                LevelSide::Resistance,
                PriceLevel {
                    price: 108.5,
                    touches: 3,
                },
            ),
        ];
        let out = render(|w| write_levels(&levels, w));
        assert_eq!(
            out,
            "side,level,touches\nsupport,100,4\nresistance,108.5,3\n"
        );
    }

    #[test]
    fn test_pattern_rows_use_display_labels() {
        let events = [PatternEvent {
            index: 1,
            timestamp: 60,
            label: PatternLabel::BullishEngulfing,
        }];
        let out = render(|w| write_patterns(&events, w));
        assert_eq!(out, "timestamp,pattern\n60,Bullish\n");
    }

    #[test]
    fn test_zone_rows() {
        let zones = [Zone {
            kind: ZoneKind::Demand,
            start_index: 0,
            end_index: 4,
            start_timestamp: 0,
            end_timestamp: 240,
            low: 99.0,
            high: 101.0,
        }];
        let out = render(|w| write_zones(&zones, w));
        assert_eq!(
            out.lines().nth(1),
            Some("demand,0,4,0,240,99,101")
        );
    }

    #[test]
    fn test_json_is_pretty() {
        let out = render(|w| write_json(&serde_json::json!({"a": 1}), w));
        assert_eq!(out, "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_output_dest_from_path() {
        assert_eq!(OutputDest::from_path(None), OutputDest::Stdout);
        assert_eq!(
            OutputDest::from_path(Some("out.csv")),
            OutputDest::File("out.csv".to_string())
        );
    }
}
