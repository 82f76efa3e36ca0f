//! Table-level facade over every signal group.
//!
//! [`TechnicalAnalysis`] borrows a validated [`BarTable`] and runs the slice
//! functions on its columns. [`analyze`] computes everything once and bundles
//! the results into an [`AnalysisReport`].
//!
//! # Example
//!
//! ```
//! use ta_signals::analysis::TechnicalAnalysis;
//! use ta_signals::bars::{Bar, BarTable};
//!
//! let bars: Vec<Bar<f64>> = (0..30)
//!     .map(|i| {
//!         let close = 100.0 + (i as f64 / 3.0).sin() * 4.0;
//!         Bar::new(i * 60, close - 0.5, close + 1.0, close - 1.0, close, 1_000.0)
//!     })
//!     .collect();
//! let table = BarTable::new(bars).unwrap();
//! let ta = TechnicalAnalysis::new(&table);
//!
//! let ma = ta.moving_average(10).unwrap();
//! assert_eq!(ma.len(), 30);
//! assert!(ma[8].is_nan());
//! assert!(!ma[9].is_nan());
//! ```

use crate::bars::BarTable;
use crate::config::AnalysisConfig;
use crate::error::{Error, LevelSide, Result};
use crate::indicators::{rsi, sma, Bollinger, BollingerOutput, Macd, MacdOutput};
use crate::kernels::local_extrema::{support_resistance, SupportResistanceSeries};
use crate::levels::{
    strong_levels_on_side, strong_support_resistance, strongest_levels, PriceLevel, StrongLevels,
};
use crate::patterns::registry::{detect_pattern, PatternRegistry};
use crate::patterns::{PatternDetector, PatternEvent};
use crate::traits::SeriesElement;
use crate::zones::{detect_supply_demand_zones, Zone};

/// Every signal computed over one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport<T> {
    /// Parameters the report was computed with.
    pub config: AnalysisConfig,
    /// Number of bars in the table.
    pub bars: usize,
    /// Timestamp of the most recent bar.
    pub last_timestamp: i64,
    /// Close of the most recent bar.
    pub current_price: T,
    /// Simple moving average of the close.
    pub moving_average: Vec<T>,
    /// RSI of the close.
    pub rsi: Vec<T>,
    /// MACD of the close.
    pub macd: MacdOutput<T>,
    /// Bollinger Bands of the close.
    pub bollinger: BollingerOutput<T>,
    /// Aligned local-extremum series.
    pub support_resistance: SupportResistanceSeries<T>,
    /// Merged strong levels. A side with no qualifying level is empty.
    pub strong_levels: StrongLevels<T>,
    /// Most touched strong support levels.
    pub strongest_support: Vec<PriceLevel<T>>,
    /// Most touched strong resistance levels.
    pub strongest_resistance: Vec<PriceLevel<T>>,
    /// Pattern events from the standard registry.
    pub patterns: Vec<PatternEvent>,
    /// Supply and demand zones.
    pub zones: Vec<Zone<T>>,
}

/// Borrowed view of a table with every signal operation on it.
#[derive(Debug, Clone, Copy)]
pub struct TechnicalAnalysis<'a, T> {
    table: &'a BarTable<T>,
}

impl<'a, T: SeriesElement> TechnicalAnalysis<'a, T> {
    /// Wraps a validated table.
    #[must_use]
    pub const fn new(table: &'a BarTable<T>) -> Self {
        Self { table }
    }

    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> &'a BarTable<T> {
        self.table
    }

    /// Close of the most recent bar.
    #[must_use]
    pub fn current_price(&self) -> T {
        self.table.last_close()
    }

    /// Simple moving average of the close.
    ///
    /// # Errors
    ///
    /// See [`sma`].
    pub fn moving_average(&self, window: usize) -> Result<Vec<T>> {
        sma(self.table.close(), window)
    }

    /// RSI of the close.
    ///
    /// # Errors
    ///
    /// See [`rsi`].
    pub fn rsi(&self, window: usize) -> Result<Vec<T>> {
        rsi(self.table.close(), window)
    }

    /// MACD of the close.
    ///
    /// # Errors
    ///
    /// See [`crate::indicators::macd()`].
    pub fn macd(&self, short: usize, long: usize, signal: usize) -> Result<MacdOutput<T>> {
        Macd::new()
            .short_period(short)
            .long_period(long)
            .signal_period(signal)
            .compute(self.table.close())
    }

    /// Bollinger Bands of the close.
    ///
    /// # Errors
    ///
    /// See [`crate::indicators::bollinger()`].
    pub fn bollinger_bands(&self, window: usize, num_std: f64) -> Result<BollingerOutput<T>> {
        Bollinger::new()
            .period(window)
            .std_dev(num_std)
            .compute(self.table.close())
    }

    /// Aligned local-extremum series of the close.
    ///
    /// # Errors
    ///
    /// See [`support_resistance`].
    pub fn support_resistance(&self, order: usize) -> Result<SupportResistanceSeries<T>> {
        support_resistance(self.table.close(), order)
    }

    /// Merged strong levels of the close.
    ///
    /// # Errors
    ///
    /// See [`strong_support_resistance`].
    pub fn strong_support_resistance(
        &self,
        order: usize,
        touch_threshold: usize,
        merge_threshold: f64,
    ) -> Result<StrongLevels<T>> {
        strong_support_resistance(self.table.close(), order, touch_threshold, merge_threshold)
    }

    /// Ranks `levels` by how many closes touch them.
    #[must_use]
    pub fn strongest_levels(&self, levels: &[T], n: usize) -> Vec<PriceLevel<T>> {
        strongest_levels(levels, self.table.close(), n)
    }

    /// Runs every detector of `registry`.
    #[must_use]
    pub fn scan_patterns(&self, registry: &PatternRegistry<T>) -> Vec<PatternEvent> {
        registry.scan(self.table)
    }

    /// Runs one detector.
    #[must_use]
    pub fn detect_pattern(&self, detector: &dyn PatternDetector<T>) -> Vec<PatternEvent> {
        detect_pattern(self.table, detector)
    }

    /// Supply and demand zones.
    ///
    /// # Errors
    ///
    /// See [`detect_supply_demand_zones`].
    pub fn supply_demand_zones(
        &self,
        consolidation_candles: usize,
        impulse_threshold: f64,
        min_zone_width: f64,
    ) -> Result<Vec<Zone<T>>> {
        detect_supply_demand_zones(
            self.table,
            consolidation_candles,
            impulse_threshold,
            min_zone_width,
        )
    }

    /// Computes the full report with `config`.
    ///
    /// # Errors
    ///
    /// See [`analyze`].
    pub fn analyze(&self, config: &AnalysisConfig) -> Result<AnalysisReport<T>> {
        config.validate()?;

        let close = self.table.close();
        let strong_support = self.strong_side(config, LevelSide::Support)?;
        let strong_resistance = self.strong_side(config, LevelSide::Resistance)?;

        let report = AnalysisReport {
            config: *config,
            bars: self.table.len(),
            last_timestamp: self.table.timestamps()[self.table.len() - 1],
            current_price: self.current_price(),
            moving_average: sma(close, config.ma_window)?,
            rsi: rsi(close, config.rsi_window)?,
            macd: config.macd().compute(close)?,
            bollinger: config.bollinger().compute(close)?,
            support_resistance: support_resistance(close, config.sr_order)?,
            strongest_support: strongest_levels(&strong_support, close, config.strongest_levels),
            strongest_resistance: strongest_levels(
                &strong_resistance,
                close,
                config.strongest_levels,
            ),
            strong_levels: StrongLevels {
                support: strong_support,
                resistance: strong_resistance,
            },
            patterns: PatternRegistry::standard().scan(self.table),
            zones: config.zones().detect(self.table)?,
        };

        tracing::debug!(
            bars = report.bars,
            support = report.strong_levels.support.len(),
            resistance = report.strong_levels.resistance.len(),
            patterns = report.patterns.len(),
            zones = report.zones.len(),
            "analysis report"
        );
        Ok(report)
    }

    fn strong_side(&self, config: &AnalysisConfig, side: LevelSide) -> Result<Vec<T>> {
        match strong_levels_on_side(
            self.table.close(),
            config.sr_order,
            config.touch_threshold,
            config.merge_threshold,
            side,
        ) {
            Err(Error::NoQualifyingLevels { side }) => {
                tracing::warn!(
                    %side,
                    touch_threshold = config.touch_threshold,
                    "no strong level qualified, reporting none"
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

/// Computes every signal over `table` with `config`.
///
/// Strong levels are the one degenerate case absorbed here: a side with no
/// qualifying level becomes an empty list plus a warning. Every other error
/// propagates.
///
/// # Errors
///
/// - errors from [`AnalysisConfig::validate`]
/// - `Error::InsufficientData` if any configured window exceeds the table
pub fn analyze<T: SeriesElement>(
    table: &BarTable<T>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport<T>> {
    TechnicalAnalysis::new(table).analyze(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::bars::Bar;
    use crate::patterns::two_candle::Engulfing;
    use crate::patterns::PatternLabel;

    fn table_from_closes(closes: &[f64]) -> BarTable<f64> {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let o = if i == 0 { c } else { closes[i - 1] };
                Bar::new(i as i64 * 60, o, o.max(c) + 0.5, o.min(c) - 0.5, c, 100.0)
            })
            .collect();
        BarTable::new(bars).unwrap()
    }

    fn bits(series: &[f64]) -> Vec<u64> {
        series.iter().map(|v| v.to_bits()).collect()
    }

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + (i as f64 / 3.0).sin() * 5.0)
            .collect()
    }

    #[test]
    fn test_wrappers_use_close() {
        let closes = wave(40);
        let table = table_from_closes(&closes);
        let ta = TechnicalAnalysis::new(&table);

        assert_eq!(
            bits(&ta.moving_average(5).unwrap()),
            bits(&sma(&closes, 5).unwrap())
        );
        assert_eq!(bits(&ta.rsi(14).unwrap()), bits(&rsi(&closes, 14).unwrap()));
        assert_eq!(
            ta.macd(12, 26, 9).unwrap(),
            crate::indicators::macd(&closes, 12, 26, 9).unwrap()
        );
        assert_eq!(ta.current_price(), closes[39]);
    }

    #[test]
    fn test_detect_pattern_through_facade() {
        let table = BarTable::new(vec![
            Bar::new(0, 10.0, 10.5, 7.5, 8.0, 1.0),
            Bar::new(60, 7.0, 11.5, 6.5, 11.0, 1.0),
        ])
        .unwrap();
        let events = TechnicalAnalysis::new(&table).detect_pattern(&Engulfing);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, PatternLabel::BullishEngulfing);
        assert_eq!(events[0].timestamp, 60);
    }

    #[test]
    fn test_report_is_aligned() {
        let table = table_from_closes(&wave(80));
        let report = analyze(&table, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.bars, 80);
        assert_eq!(report.last_timestamp, 79 * 60);
        assert_eq!(report.moving_average.len(), 80);
        assert_eq!(report.rsi.len(), 80);
        assert_eq!(report.macd.len(), 80);
        assert_eq!(report.bollinger.len(), 80);
        assert_eq!(report.support_resistance.len(), 80);
        assert!(report.strongest_support.len() <= 3);
        assert!(report.strongest_resistance.len() <= 3);
        assert!(report
            .patterns
            .windows(2)
            .all(|w| w[0].index <= w[1].index));
    }

    #[test]
    fn test_report_absorbs_missing_levels() {
        // a steady climb leaves every extremum with a single touch
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let table = table_from_closes(&closes);
        let ta = TechnicalAnalysis::new(&table);

        assert!(matches!(
            ta.strong_support_resistance(5, 3, 0.01),
            Err(Error::NoQualifyingLevels {
                side: LevelSide::Support
            })
        ));

        let report = ta.analyze(&AnalysisConfig::default()).unwrap();
        assert!(report.strong_levels.support.is_empty());
        assert!(report.strong_levels.resistance.is_empty());
        assert!(report.strongest_support.is_empty());
    }

    #[test]
    fn test_report_rejects_short_table() {
        let table = table_from_closes(&wave(15));
        assert!(matches!(
            analyze(&table, &AnalysisConfig::default()),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_report_rejects_bad_config() {
        let table = table_from_closes(&wave(80));
        let config = AnalysisConfig {
            macd_short: 30,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze(&table, &config),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_report_serializes_nan_as_null() {
        let table = table_from_closes(&wave(40));
        let report = analyze(&table, &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["moving_average"][0].is_null());
        assert_eq!(json["bars"], 40);
    }
}
