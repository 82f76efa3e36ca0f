//! CLI argument parsing.
//!
//! Every command reads one OHLCV CSV file:
//! `ta-signals <command> <input.csv> [params] [-o output]`
//!
//! # Examples
//!
//! ```bash
//! # 20-bar simple moving average of the closes
//! ta-signals sma bars.csv
//!
//! # MACD with custom spans
//! ta-signals macd bars.csv 8,21,5 -o macd.csv
//!
//! # Strong support and resistance levels
//! ta-signals levels bars.csv --order 3 --touches 2
//!
//! # Every analysis as one JSON report, parameters from a config file
//! ta-signals report bars.csv --config analysis.json
//! ```

use clap::{Parser, Subcommand};

use crate::error::{CliError, Result};

/// ta-signals: technical signals from OHLCV bars
#[derive(Parser, Debug)]
#[command(name = "ta-signals")]
#[command(author, version, about = "Technical indicators, levels, patterns and zones")]
#[command(long_about = "ta-signals reads OHLCV bars from a CSV file and computes moving \
    averages, momentum indicators, support and resistance levels, candlestick patterns \
    and supply/demand zones. Output goes to stdout unless a file is given.")]
pub struct Args {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The analysis to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simple Moving Average
    #[command(about = "Simple Moving Average (SMA) of the closes")]
    Sma {
        /// Input CSV file
        input: String,

        /// Window length
        #[arg(default_value = "20")]
        period: usize,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Relative Strength Index
    #[command(about = "Relative Strength Index (RSI) of the closes")]
    Rsi {
        /// Input CSV file
        input: String,

        /// Window length
        #[arg(default_value = "14")]
        period: usize,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Moving Average Convergence Divergence
    #[command(about = "MACD line, signal line and histogram")]
    Macd {
        /// Input CSV file
        input: String,

        /// Parameters: short,long,signal (e.g., 12,26,9)
        #[arg(default_value = "12,26,9")]
        params: String,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Bollinger Bands
    #[command(about = "Bollinger Bands around a simple moving average")]
    Bollinger {
        /// Input CSV file
        input: String,

        /// Parameters: period,std_dev (e.g., 20,2.0)
        #[arg(default_value = "20,2.0")]
        params: String,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Strong support and resistance levels
    #[command(about = "Strong support and resistance levels with touch counts")]
    Levels {
        /// Input CSV file
        input: String,

        /// Neighbourhood half-width for local extrema
        #[arg(long, default_value = "5")]
        order: usize,

        /// Minimum closes touching a level
        #[arg(long, default_value = "3")]
        touches: usize,

        /// Relative distance under which levels merge
        #[arg(long, default_value = "0.01")]
        merge: f64,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Candlestick patterns
    #[command(about = "Candlestick patterns found by the standard detector set")]
    Patterns {
        /// Input CSV file
        input: String,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Supply and demand zones
    #[command(about = "Supply and demand zones left by impulse candles")]
    Zones {
        /// Input CSV file
        input: String,

        /// Consolidation candles before the impulse
        #[arg(long, default_value = "5")]
        candles: usize,

        /// Minimum relative body of the impulse candle
        #[arg(long, default_value = "0.02")]
        impulse: f64,

        /// Minimum zone height relative to its mean close
        #[arg(long = "min-width", default_value = "0.01")]
        min_width: f64,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Full analysis report
    #[command(about = "Run every analysis and print one JSON report")]
    Report {
        /// Input CSV file
        input: String,

        /// JSON file with analysis parameters (missing fields keep defaults)
        #[arg(short, long)]
        config: Option<String>,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the input file path from the command.
    #[must_use]
    pub fn input_path(&self) -> &str {
        match &self.command {
            Command::Sma { input, .. }
            | Command::Rsi { input, .. }
            | Command::Macd { input, .. }
            | Command::Bollinger { input, .. }
            | Command::Levels { input, .. }
            | Command::Patterns { input, .. }
            | Command::Zones { input, .. }
            | Command::Report { input, .. } => input,
        }
    }

    /// Get the output file path from the command, if specified.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        match &self.command {
            Command::Sma { output, .. }
            | Command::Rsi { output, .. }
            | Command::Macd { output, .. }
            | Command::Bollinger { output, .. }
            | Command::Levels { output, .. }
            | Command::Patterns { output, .. }
            | Command::Zones { output, .. }
            | Command::Report { output, .. } => output.as_deref(),
        }
    }
}

fn parse_part<V: std::str::FromStr>(part: &str, argument: &str, example: &str) -> Result<V> {
    part.trim().parse::<V>().map_err(|_| CliError::InvalidArgument {
        argument: argument.to_string(),
        reason: format!("cannot parse '{part}' as a number"),
        suggestion: Some(format!("Use a value like {example}")),
    })
}

/// Parse MACD parameters from string "short,long,signal".
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for a wrong part count, a non-integer
/// part, a zero span or `short >= long`.
pub fn parse_macd_params(params: &str) -> Result<(usize, usize, usize)> {
    let parts: Vec<&str> = params.split(',').collect();
    if parts.len() != 3 {
        return Err(CliError::InvalidArgument {
            argument: "params".to_string(),
            reason: format!("MACD requires 3 parameters, got {}", parts.len()),
            suggestion: Some("Use format: short,long,signal (e.g., 12,26,9)".to_string()),
        });
    }

    let short = parse_part(parts[0], "short_period", "12")?;
    let long = parse_part(parts[1], "long_period", "26")?;
    let signal = parse_part(parts[2], "signal_period", "9")?;

    if short == 0 || long == 0 || signal == 0 {
        return Err(CliError::InvalidArgument {
            argument: "params".to_string(),
            reason: "all periods must be positive".to_string(),
            suggestion: Some("Use positive integers like 12,26,9".to_string()),
        });
    }
    if short >= long {
        return Err(CliError::InvalidArgument {
            argument: "params".to_string(),
            reason: "short period must be less than long period".to_string(),
            suggestion: Some("Use short < long (e.g., 12,26,9)".to_string()),
        });
    }

    Ok((short, long, signal))
}

/// Parse Bollinger parameters from string "period,std_dev".
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for a wrong part count, an
/// unparseable part, a period below 2 or a negative multiplier.
pub fn parse_bollinger_params(params: &str) -> Result<(usize, f64)> {
    let parts: Vec<&str> = params.split(',').collect();
    if parts.len() != 2 {
        return Err(CliError::InvalidArgument {
            argument: "params".to_string(),
            reason: format!("Bollinger requires 2 parameters, got {}", parts.len()),
            suggestion: Some("Use format: period,std_dev (e.g., 20,2.0)".to_string()),
        });
    }

    let period: usize = parse_part(parts[0], "period", "20")?;
    let std_dev: f64 = parse_part(parts[1], "std_dev", "2.0")?;

    if period < 2 {
        return Err(CliError::InvalidArgument {
            argument: "period".to_string(),
            reason: "period must be at least 2".to_string(),
            suggestion: Some("Use an integer like 20".to_string()),
        });
    }
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(CliError::InvalidArgument {
            argument: "std_dev".to_string(),
            reason: "std_dev must be a non-negative number".to_string(),
            suggestion: Some("Use a number like 2.0".to_string()),
        });
    }

    Ok((period, std_dev))
}
