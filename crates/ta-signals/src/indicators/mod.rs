//! Series indicators over a single price column.
//!
//! Every function here shares the same contract:
//!
//! - **Generic**: works for `f32` and `f64` via
//!   [`SeriesElement`](crate::traits::SeriesElement)
//! - **Aligned**: output has the same length as the input, NaN during warm-up
//! - **Pure**: the input slice is never modified
//! - **Validated**: parameter misuse is rejected before any computation
//!
//! # Indicators
//!
//! - [`sma`] - simple moving average
//! - [`ema`] - recursive exponential moving average, seeded with the first value
//! - [`rsi`] - relative strength index on simple rolling means
//! - [`macd`] - MACD line, signal line and histogram
//! - [`bollinger`] - Bollinger Bands with sample standard deviation
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::{ema, rsi, sma};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let sma_result = sma(&prices, 5).unwrap();
//! let ema_result = ema(&prices, 5).unwrap();
//! let rsi_result = rsi(&prices, 5).unwrap();
//!
//! assert!(sma_result[3].is_nan());
//! assert!(!ema_result[0].is_nan());
//! assert!(rsi_result[3].is_nan());
//! ```

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{
    bollinger, bollinger_lookback, bollinger_min_len, rolling_stddev, Bollinger, BollingerOutput,
};
pub use ema::{ema, ema_lookback, ema_min_len};
pub use macd::{macd, macd_min_len, Macd, MacdOutput};
pub use rsi::{rsi, rsi_lookback, rsi_min_len, RSI_DEFAULT_PERIOD};
pub use sma::{sma, sma_lookback, sma_min_len};
