//! Aggregate configuration for a full analysis run.
//!
//! [`AnalysisConfig`] holds every numeric parameter [`crate::analysis::analyze`]
//! needs. With the `serde` feature it deserializes from JSON; missing fields
//! take their defaults, so `{}` is a valid config.
//!
//! ```
//! use ta_signals::config::AnalysisConfig;
//!
//! let config = AnalysisConfig {
//!     ma_window: 50,
//!     ..AnalysisConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.macd().get_long_period(), 26);
//! ```

use crate::error::{Error, Result};
use crate::indicators::{Bollinger, Macd};
use crate::levels::StrongLevelsConfig;
use crate::traits::{validate_period, validate_threshold};
use crate::zones::ZoneDetector;

/// Every parameter of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Simple moving average window.
    pub ma_window: usize,
    /// RSI window.
    pub rsi_window: usize,
    /// MACD short EMA span.
    pub macd_short: usize,
    /// MACD long EMA span.
    pub macd_long: usize,
    /// MACD signal EMA span.
    pub macd_signal: usize,
    /// Bollinger window.
    pub bollinger_window: usize,
    /// Bollinger standard deviation multiplier.
    pub bollinger_std: f64,
    /// Half-width of the local extremum neighbourhood.
    pub sr_order: usize,
    /// Minimum closes touching a strong level.
    pub touch_threshold: usize,
    /// Relative distance under which strong levels merge.
    pub merge_threshold: f64,
    /// Number of strongest levels kept per side.
    pub strongest_levels: usize,
    /// Zone consolidation candle count.
    pub consolidation_candles: usize,
    /// Relative body size of an impulse bar.
    pub impulse_threshold: f64,
    /// Minimum zone height relative to its mean close.
    pub min_zone_width: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ma_window: 20,
            rsi_window: 14,
            macd_short: 12,
            macd_long: 26,
            macd_signal: 9,
            bollinger_window: 20,
            bollinger_std: 2.0,
            sr_order: 5,
            touch_threshold: 3,
            merge_threshold: 0.01,
            strongest_levels: 3,
            consolidation_candles: 5,
            impulse_threshold: 0.02,
            min_zone_width: 0.01,
        }
    }
}

impl AnalysisConfig {
    /// Checks every parameter without looking at any data.
    ///
    /// Length checks still happen per operation, since they depend on the table.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod` for a zero window, or a Bollinger window below 2
    /// - `Error::InvalidParameter` for `macd_short >= macd_long` or a negative
    ///   or non-finite threshold
    pub fn validate(&self) -> Result<()> {
        validate_period(self.ma_window)?;
        validate_period(self.rsi_window)?;
        validate_period(self.macd_short)?;
        validate_period(self.macd_long)?;
        validate_period(self.macd_signal)?;
        validate_period(self.bollinger_window)?;
        validate_period(self.sr_order)?;
        validate_period(self.consolidation_candles)?;

        if self.macd_short >= self.macd_long {
            return Err(Error::InvalidParameter {
                name: "macd_short",
                reason: "must be smaller than macd_long",
            });
        }
        if self.bollinger_window < 2 {
            return Err(Error::InvalidPeriod {
                period: self.bollinger_window,
                reason: "bollinger window must be at least 2",
            });
        }

        validate_threshold("bollinger_std", self.bollinger_std)?;
        validate_threshold("merge_threshold", self.merge_threshold)?;
        validate_threshold("impulse_threshold", self.impulse_threshold)?;
        validate_threshold("min_zone_width", self.min_zone_width)?;
        Ok(())
    }

    /// MACD configuration.
    #[must_use]
    pub fn macd(&self) -> Macd {
        Macd::new()
            .short_period(self.macd_short)
            .long_period(self.macd_long)
            .signal_period(self.macd_signal)
    }

    /// Bollinger configuration.
    #[must_use]
    pub fn bollinger(&self) -> Bollinger {
        Bollinger::new()
            .period(self.bollinger_window)
            .std_dev(self.bollinger_std)
    }

    /// Strong level configuration.
    #[must_use]
    pub fn strong_levels(&self) -> StrongLevelsConfig {
        StrongLevelsConfig::new()
            .order(self.sr_order)
            .touch_threshold(self.touch_threshold)
            .merge_threshold(self.merge_threshold)
    }

    /// Zone detector configuration.
    #[must_use]
    pub fn zones(&self) -> ZoneDetector {
        ZoneDetector::new()
            .consolidation_candles(self.consolidation_candles)
            .impulse_threshold(self.impulse_threshold)
            .min_zone_width(self.min_zone_width)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_accessors_carry_parameters() {
        let config = AnalysisConfig {
            bollinger_window: 10,
            bollinger_std: 1.5,
            sr_order: 2,
            consolidation_candles: 3,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.bollinger().get_period(), 10);
        assert_eq!(config.bollinger().get_std_dev(), 1.5);
        assert_eq!(config.strong_levels().get_order(), 2);
        assert_eq!(config.strong_levels().get_touch_threshold(), 3);
        assert_eq!(config.zones().get_consolidation_candles(), 3);
        assert_eq!(config.macd().get_short_period(), 12);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = AnalysisConfig {
            rsi_window: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
    }

    #[test]
    fn test_macd_order_rejected() {
        let config = AnalysisConfig {
            macd_short: 26,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter {
                name: "macd_short",
                ..
            })
        ));
    }

    #[test]
    fn test_bollinger_window_of_one_rejected() {
        let config = AnalysisConfig {
            bollinger_window: 1,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidPeriod { period: 1, .. })
        ));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = AnalysisConfig {
            impulse_threshold: -0.5,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter {
                name: "impulse_threshold",
                ..
            })
        ));

        let config = AnalysisConfig {
            merge_threshold: f64::NAN,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"ma_window": 50}"#).unwrap();
        assert_eq!(config.ma_window, 50);
        assert_eq!(config.rsi_window, 14);
        assert_eq!(config.min_zone_width, 0.01);
    }
}
