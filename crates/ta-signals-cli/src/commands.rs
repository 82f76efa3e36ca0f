//! Command dispatch: parse the input, run the analysis, write the output.

use std::fs::File;
use std::io::BufReader;

use ta_signals::config::AnalysisConfig;
use ta_signals::error::LevelSide;
use ta_signals::indicators::{
    bollinger, bollinger_lookback, macd, rsi, rsi_lookback, sma, sma_lookback,
};
use ta_signals::levels::{count_touches, strong_levels_on_side, PriceLevel};
use ta_signals::patterns::PatternRegistry;
use ta_signals::zones::ZoneDetector;
use ta_signals::{analyze, BarTable, Error};

use crate::args::{parse_bollinger_params, parse_macd_params, Args, Command};
use crate::csv_parser::parse_bars;
use crate::csv_writer::{
    write_json, write_levels, write_multi_output, write_patterns, write_zones, OutputDest,
};
use crate::error::{CliError, Result};

/// Runs the parsed command line.
///
/// # Errors
///
/// Returns the first parse, argument, computation or write error.
pub fn run(args: &Args) -> Result<()> {
    let table = parse_bars(args.input_path())?;
    let dest = OutputDest::from_path(args.output_path());
    tracing::debug!(input = args.input_path(), bars = table.len(), "loaded input");

    let mut writer = dest.writer()?;
    let writer = &mut *writer;
    let close = table.close();
    let timestamps = table.timestamps();

    match &args.command {
        Command::Sma { period, .. } => {
            let values = sma(close, *period)?;
            let header = format!("sma_{period}");
            write_multi_output(
                &[(header.as_str(), values.as_slice())],
                timestamps,
                sma_lookback(*period),
                writer,
            )
        }
        Command::Rsi { period, .. } => {
            let values = rsi(close, *period)?;
            let header = format!("rsi_{period}");
            write_multi_output(
                &[(header.as_str(), values.as_slice())],
                timestamps,
                rsi_lookback(*period),
                writer,
            )
        }
        Command::Macd { params, .. } => {
            let (short, long, signal) = parse_macd_params(params)?;
            let out = macd(close, short, long, signal)?;
            write_multi_output(
                &[
                    ("macd", out.macd_line.as_slice()),
                    ("signal", out.signal_line.as_slice()),
                    ("histogram", out.histogram.as_slice()),
                ],
                timestamps,
                0,
                writer,
            )
        }
        Command::Bollinger { params, .. } => {
            let (period, std_dev) = parse_bollinger_params(params)?;
            let bands = bollinger(close, period, std_dev)?;
            write_multi_output(
                &[
                    ("upper", bands.upper.as_slice()),
                    ("middle", bands.middle.as_slice()),
                    ("lower", bands.lower.as_slice()),
                ],
                timestamps,
                bollinger_lookback(period),
                writer,
            )
        }
        Command::Levels {
            order,
            touches,
            merge,
            ..
        } => {
            let mut rows = level_rows(&table, *order, *touches, *merge, LevelSide::Support)?;
            rows.extend(level_rows(&table, *order, *touches, *merge, LevelSide::Resistance)?);
            write_levels(&rows, writer)
        }
        Command::Patterns { .. } => {
            let events = PatternRegistry::standard().scan(&table);
            write_patterns(&events, writer)
        }
        Command::Zones {
            candles,
            impulse,
            min_width,
            ..
        } => {
            let zones = ZoneDetector::new()
                .consolidation_candles(*candles)
                .impulse_threshold(*impulse)
                .min_zone_width(*min_width)
                .detect(&table)?;
            write_zones(&zones, writer)
        }
        Command::Report { config, .. } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => AnalysisConfig::default(),
            };
            let report = analyze(&table, &config)?;
            write_json(&report, writer)
        }
    }
}

/// Strong levels of one side with their touch counts.
///
/// A side with no qualifying level yields no rows.
fn level_rows(
    table: &BarTable<f64>,
    order: usize,
    touches: usize,
    merge: f64,
    side: LevelSide,
) -> Result<Vec<(LevelSide, PriceLevel<f64>)>> {
    let close = table.close();
    match strong_levels_on_side(close, order, touches, merge, side) {
        Ok(levels) => Ok(count_touches(&levels, close)
            .into_iter()
            .map(|level| (side, level))
            .collect()),
        Err(Error::NoQualifyingLevels { side }) => {
            tracing::warn!(%side, touch_threshold = touches, "no strong level qualified");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}

/// Reads an [`AnalysisConfig`] from a JSON file.
///
/// # Errors
///
/// Returns `CliError::IoError` or `CliError::JsonError`, both carrying the path.
pub fn load_config(path: &str) -> Result<AnalysisConfig> {
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.to_string()),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::JsonError {
        source: e,
        path: Some(path.to_string()),
    })
}
