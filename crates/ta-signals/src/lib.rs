//! ta-signals: technical-analysis signals over OHLCV bar tables
//!
//! Every operation is a pure function over a validated, immutable
//! [`bars::BarTable`] (or one of its columns) and returns fresh series or
//! event lists.
//!
//! # Features
//!
//! - **Indicators**: moving average, RSI, MACD, Bollinger Bands
//! - **Levels**: local-extremum support/resistance, touch counting, merging
//! - **Patterns**: a registry of candlestick detectors
//! - **Zones**: consolidation-then-impulse supply and demand zones
//! - **Generics**: works with both `f32` and `f64`
//!
//! Cargo features: `serde` derives `Serialize`/`Deserialize` on inputs,
//! outputs and [`config::AnalysisConfig`]; `parallel` lets
//! [`batch::BatchProcessor`] use rayon.
//!
//! # Quick Start
//!
//! ```
//! use ta_signals::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! // First 2 values are NaN (lookback period)
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! ```
//!
//! # Full report
//!
//! ```
//! use ta_signals::prelude::*;
//!
//! let bars: Vec<Bar<f64>> = (0..60)
//!     .map(|i| {
//!         let c = 100.0 + (i as f64 / 4.0).sin() * 5.0;
//!         Bar::new(1_700_000_000 + i * 3_600, c - 0.2, c + 0.8, c - 0.8, c, 500.0)
//!     })
//!     .collect();
//! let table = BarTable::new(bars).unwrap();
//!
//! let report = analyze(&table, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.bars, 60);
//! assert_eq!(report.rsi.len(), 60);
//! ```
//!
//! # Error Handling
//!
//! All fallible functions return [`Result<T, Error>`] and validate before
//! computing:
//!
//! ```
//! use ta_signals::prelude::*;
//!
//! // Window longer than the data
//! let short_data = vec![1.0_f64, 2.0];
//! assert!(sma(&short_data, 10).is_err());
//!
//! // Empty data
//! let empty: Vec<f64> = vec![];
//! assert!(sma(&empty, 5).is_err());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod bars;
pub mod batch;
pub mod config;
pub mod error;
pub mod indicators;
pub mod kernels;
pub mod levels;
pub mod patterns;
pub mod prelude;
pub mod traits;
pub mod utils;
pub mod zones;

// Re-export commonly used types at crate root
pub use analysis::{analyze, AnalysisReport, TechnicalAnalysis};
pub use bars::{Bar, BarTable};
pub use config::AnalysisConfig;
pub use error::{Error, LevelSide, Result};
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, EPSILON, LOOSE_EPSILON};
