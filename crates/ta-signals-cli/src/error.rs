//! CLI error types for file I/O, parsing, configuration and signal errors.
//!
//! [`CliError`] wraps every failure the command line can hit. Messages say
//! what went wrong and, where there is one, how to fix it.

use std::fmt;
use std::io;

/// CLI error type encompassing all possible error conditions.
#[derive(Debug)]
pub enum CliError {
    /// An I/O error occurred while reading or writing files.
    IoError {
        /// The underlying I/O error.
        source: io::Error,
        /// Path that caused the error, if known.
        path: Option<String>,
    },
    /// The CSV input is malformed.
    CsvParseError {
        /// Description of the parse error.
        message: String,
        /// Line number where the error occurred, if known.
        line: Option<usize>,
    },
    /// A configuration or report could not be read or written as JSON.
    JsonError {
        /// The underlying serde_json error.
        source: serde_json::Error,
        /// Path of the JSON file, if any.
        path: Option<String>,
    },
    /// A signal computation rejected its input.
    SignalError {
        /// The underlying ta-signals error.
        source: ta_signals::Error,
    },
    /// An invalid argument was provided.
    InvalidArgument {
        /// Name of the invalid argument.
        argument: String,
        /// Description of why it's invalid.
        reason: String,
        /// Suggestion for valid values.
        suggestion: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError { source, path } => {
                if let Some(p) = path {
                    write!(f, "I/O error with file '{p}': {source}. ")?;
                    write!(f, "Check that the file exists and you have permission to access it.")
                } else {
                    write!(f, "I/O error: {source}")
                }
            }
            Self::CsvParseError { message, line } => {
                if let Some(l) = line {
                    write!(f, "CSV parse error on line {l}: {message}. ")?;
                } else {
                    write!(f, "CSV parse error: {message}. ")?;
                }
                write!(
                    f,
                    "Expected a header row with timestamp, open, high, low, close and volume columns."
                )
            }
            Self::JsonError { source, path } => match path {
                Some(p) => write!(f, "JSON error in '{p}': {source}"),
                None => write!(f, "JSON error: {source}"),
            },
            Self::SignalError { source } => write!(f, "Signal computation error: {source}"),
            Self::InvalidArgument {
                argument,
                reason,
                suggestion,
            } => {
                write!(f, "Invalid argument '{argument}': {reason}")?;
                if let Some(s) = suggestion {
                    write!(f, ". {s}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError { source, .. } => Some(source),
            Self::JsonError { source, .. } => Some(source),
            Self::SignalError { source } => Some(source),
            Self::CsvParseError { .. } | Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            source: err,
            path: None,
        }
    }
}

impl From<ta_signals::Error> for CliError {
    fn from(err: ta_signals::Error) -> Self {
        Self::SignalError { source: err }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError {
            source: err,
            path: None,
        }
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .and_then(|p| usize::try_from(p.line()).ok());
        Self::CsvParseError {
            message: err.to_string(),
            line,
        }
    }
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
