//! Commonly used types and traits for convenient importing.
//!
//! ```
//! use ta_signals::prelude::*;
//!
//! let prices = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//!
//! let sma_result = sma(&prices, 3).unwrap();
//! let ema_result = ema(&prices, 3).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//! assert_eq!(sma_result.len(), ema_result.len());
//! assert_eq!(rsi_result.len(), 10);
//! ```
//!
//! # Contents
//!
//! - errors: [`Error`], [`Result`], [`LevelSide`]
//! - traits: [`SeriesElement`], [`ValidatedInput`], [`PatternDetector`]
//! - input: [`Bar`], [`BarTable`]
//! - indicator functions, their output and configuration types
//! - level, pattern and zone entry points
//! - the [`TechnicalAnalysis`] facade, [`analyze`], [`AnalysisConfig`] and
//!   [`BatchProcessor`]

// Error types
pub use crate::error::{Error, LevelSide, Result};

// Traits
pub use crate::patterns::PatternDetector;
pub use crate::traits::{SeriesElement, ValidatedInput};

// Input
pub use crate::bars::{Bar, BarTable};

// Indicator functions
pub use crate::indicators::{bollinger, ema, macd, rolling_stddev, rsi, sma};

// Multi-output and configuration types
pub use crate::indicators::{Bollinger, BollingerOutput, Macd, MacdOutput};

// Lookback functions
pub use crate::indicators::{
    bollinger_lookback, bollinger_min_len, ema_lookback, ema_min_len, macd_min_len, rsi_lookback,
    rsi_min_len, sma_lookback, sma_min_len,
};

// Levels
pub use crate::kernels::{find_local_extrema, support_resistance, LocalExtrema};
pub use crate::levels::{
    count_touches, merge_levels, strong_support_resistance, strongest_levels, PriceLevel,
    StrongLevels, StrongLevelsConfig,
};

// Patterns and zones
pub use crate::patterns::{Candle, PatternEvent, PatternLabel, PatternRegistry};
pub use crate::zones::{detect_supply_demand_zones, Zone, ZoneDetector, ZoneKind};

// Facade
pub use crate::analysis::{analyze, AnalysisReport, TechnicalAnalysis};
pub use crate::batch::BatchProcessor;
pub use crate::config::AnalysisConfig;
