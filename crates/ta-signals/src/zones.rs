//! Supply and demand zones.
//!
//! A zone is a consolidation window followed by an impulse bar. For every
//! candidate end bar `i` the window is bars `i - n ..= i` (`n` =
//! consolidation candles), and bar `i + 1` is tested as the impulse:
//!
//! ```text
//! change = |close - open| / open          (impulse bar)
//! width  = (max high - min low) / mean close   (window)
//! ```
//!
//! A zone is emitted when `change > impulse_threshold` and
//! `width >= min_zone_width`; it is a demand zone when the impulse closes
//! above its open and a supply zone otherwise. Candidate end bars run over
//! `n .. len - n`, so the last `n` bars never end a window. Zones come out
//! in scan order and overlapping zones are kept as they are. A NaN ratio
//! (zero open or zero mean close) fails both gates.
//!
//! # Example
//!
//! ```
//! use ta_signals::bars::{Bar, BarTable};
//! use ta_signals::zones::{detect_supply_demand_zones, ZoneKind};
//!
//! let mut bars: Vec<Bar<f64>> = (0..4)
//!     .map(|i| Bar::new(i, 100.0, 101.0, 99.0, 100.0, 1.0))
//!     .collect();
//! bars.push(Bar::new(4, 100.0, 103.5, 99.5, 103.0, 5.0));
//! bars.push(Bar::new(5, 103.0, 103.5, 102.5, 103.0, 1.0));
//! bars.push(Bar::new(6, 103.0, 103.5, 102.5, 103.0, 1.0));
//! let table = BarTable::new(bars).unwrap();
//!
//! let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap();
//! assert_eq!(zones.len(), 1);
//! assert_eq!(zones[0].kind, ZoneKind::Demand);
//! assert_eq!((zones[0].start_index, zones[0].end_index), (0, 3));
//! ```

use std::fmt;

use crate::bars::BarTable;
use crate::error::{Error, Result};
use crate::traits::{validate_threshold, SeriesElement, ValidatedInput};

/// Direction of the impulse that left a zone behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoneKind {
    /// Bearish impulse.
    Supply,
    /// Bullish impulse.
    Demand,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supply => f.write_str("supply"),
            Self::Demand => f.write_str("demand"),
        }
    }
}

/// A consolidation band left behind by an impulse move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone<T> {
    /// Supply or demand.
    pub kind: ZoneKind,
    /// First bar of the consolidation window.
    pub start_index: usize,
    /// Last bar of the consolidation window.
    pub end_index: usize,
    /// Timestamp of `start_index`.
    pub start_timestamp: i64,
    /// Timestamp of `end_index`.
    pub end_timestamp: i64,
    /// Lowest low of the window.
    pub low: T,
    /// Highest high of the window.
    pub high: T,
}

/// Minimum table length accepted for `consolidation_candles`.
///
/// The first candidate end bar is `n` and the scan stops before `len - n`,
/// so anything shorter than `2n + 1` bars has no candidate at all.
#[inline]
#[must_use]
pub const fn zones_min_len(consolidation_candles: usize) -> usize {
    2 * consolidation_candles + 1
}

/// Scans `table` for supply and demand zones.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `consolidation_candles` is zero
/// - `Error::InvalidParameter` if a threshold is negative or not finite
/// - `Error::InsufficientData` if the table has no candidate end bar
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn detect_supply_demand_zones<T: SeriesElement>(
    table: &BarTable<T>,
    consolidation_candles: usize,
    impulse_threshold: f64,
    min_zone_width: f64,
) -> Result<Vec<Zone<T>>> {
    if consolidation_candles == 0 {
        return Err(Error::InvalidPeriod {
            period: consolidation_candles,
            reason: "consolidation window needs at least 1 candle",
        });
    }
    validate_threshold("impulse_threshold", impulse_threshold)?;
    validate_threshold("min_zone_width", min_zone_width)?;
    table
        .close()
        .validate_min_length(zones_min_len(consolidation_candles), "supply_demand_zones")?;

    let impulse = T::from_f64(impulse_threshold)?;
    let min_width = T::from_f64(min_zone_width)?;
    let window_len = T::from_usize(consolidation_candles + 1)?;

    let (open, high, low, close) = (table.open(), table.high(), table.low(), table.close());
    let timestamps = table.timestamps();
    let n = consolidation_candles;

    let mut zones = Vec::new();
    for i in n..table.len().saturating_sub(n) {
        let start = i - n;
        let window = start..=i;

        // negated so a NaN ratio (zero open) fails the gate
        let change = (close[i + 1] - open[i + 1]).abs() / open[i + 1];
        if !(change > impulse) {
            continue;
        }

        let zone_low = low[window.clone()].iter().copied().fold(T::infinity(), T::min);
        let zone_high = high[window.clone()]
            .iter()
            .copied()
            .fold(T::neg_infinity(), T::max);
        let avg_price = close[window].iter().fold(T::zero(), |acc, &c| acc + c) / window_len;

        let width = (zone_high - zone_low) / avg_price;
        if !(width >= min_width) {
            continue;
        }

        let kind = if close[i + 1] > open[i + 1] {
            ZoneKind::Demand
        } else {
            ZoneKind::Supply
        };
        zones.push(Zone {
            kind,
            start_index: start,
            end_index: i,
            start_timestamp: timestamps[start],
            end_timestamp: timestamps[i],
            low: zone_low,
            high: zone_high,
        });
    }

    tracing::debug!(
        consolidation_candles,
        impulse_threshold,
        zones = zones.len(),
        "supply/demand zones"
    );
    Ok(zones)
}

/// Zone detection configuration with fluent builder API.
///
/// ```
/// use ta_signals::zones::ZoneDetector;
///
/// let detector = ZoneDetector::new().consolidation_candles(3).impulse_threshold(0.03);
/// assert_eq!(detector.get_consolidation_candles(), 3);
/// assert_eq!(detector.get_min_zone_width(), 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDetector {
    consolidation_candles: usize,
    impulse_threshold: f64,
    min_zone_width: f64,
}

impl Default for ZoneDetector {
    /// Five consolidation candles, 2% impulse, 1% minimum width.
    fn default() -> Self {
        Self {
            consolidation_candles: 5,
            impulse_threshold: 0.02,
            min_zone_width: 0.01,
        }
    }
}

impl ZoneDetector {
    /// Creates a detector with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of candles before the window's last bar.
    ///
    /// Default: 5
    #[must_use]
    pub const fn consolidation_candles(mut self, candles: usize) -> Self {
        self.consolidation_candles = candles;
        self
    }

    /// Sets the relative body size an impulse bar must exceed.
    ///
    /// Default: 0.02
    #[must_use]
    pub const fn impulse_threshold(mut self, threshold: f64) -> Self {
        self.impulse_threshold = threshold;
        self
    }

    /// Sets the minimum window height relative to its mean close.
    ///
    /// Default: 0.01
    #[must_use]
    pub const fn min_zone_width(mut self, width: f64) -> Self {
        self.min_zone_width = width;
        self
    }

    /// Runs [`detect_supply_demand_zones`] with the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`detect_supply_demand_zones`].
    pub fn detect<T: SeriesElement>(&self, table: &BarTable<T>) -> Result<Vec<Zone<T>>> {
        detect_supply_demand_zones(
            table,
            self.consolidation_candles,
            self.impulse_threshold,
            self.min_zone_width,
        )
    }

    /// Returns the consolidation candle count.
    #[must_use]
    pub const fn get_consolidation_candles(&self) -> usize {
        self.consolidation_candles
    }

    /// Returns the impulse threshold.
    #[must_use]
    pub const fn get_impulse_threshold(&self) -> f64 {
        self.impulse_threshold
    }

    /// Returns the minimum zone width.
    #[must_use]
    pub const fn get_min_zone_width(&self) -> f64 {
        self.min_zone_width
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::bars::Bar;

    /// Three flat bars (high 101, low 99), one more, an impulse bar, then two quiet bars.
    fn consolidation_then(impulse_open: f64, impulse_close: f64) -> BarTable<f64> {
        let mut bars: Vec<Bar<f64>> = (0..4)
            .map(|i| Bar::new(i, 100.0, 101.0, 99.0, 100.0, 1.0))
            .collect();
        let (lo, hi) = (impulse_open.min(impulse_close), impulse_open.max(impulse_close));
        bars.push(Bar::new(4, impulse_open, hi + 0.5, lo - 0.5, impulse_close, 5.0));
        bars.push(Bar::new(5, impulse_close, impulse_close + 0.5, impulse_close - 0.5, impulse_close, 1.0));
        bars.push(Bar::new(6, impulse_close, impulse_close + 0.5, impulse_close - 0.5, impulse_close, 1.0));
        BarTable::new(bars).unwrap()
    }

    #[test]
    fn test_bullish_impulse_is_demand() {
        let table = consolidation_then(100.0, 103.0);
        let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap();
        assert_eq!(
            zones,
            vec![Zone {
                kind: ZoneKind::Demand,
                start_index: 0,
                end_index: 3,
                start_timestamp: 0,
                end_timestamp: 3,
                low: 99.0,
                high: 101.0,
            }]
        );
    }

    #[test]
    fn test_bearish_impulse_is_supply() {
        let table = consolidation_then(100.0, 97.0);
        let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].kind, ZoneKind::Supply);
    }

    #[test]
    fn test_narrow_window_is_skipped() {
        // window height 2 over mean 100 is 2%, below a 5% minimum
        let table = consolidation_then(100.0, 103.0);
        let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.05).unwrap();
        assert!(zones.is_empty());
    }

    #[test]
    fn test_impulse_threshold_is_strict() {
        let table = consolidation_then(100.0, 102.0);
        let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap();
        assert!(zones.is_empty());
    }

    #[test]
    fn test_last_window_end_is_excluded() {
        // with len 7 and 3 candles only end bar 3 is scanned; an impulse at bar 5 is ignored
        let mut bars: Vec<Bar<f64>> = (0..5)
            .map(|i| Bar::new(i, 100.0, 101.0, 99.0, 100.0, 1.0))
            .collect();
        bars.push(Bar::new(5, 100.0, 110.5, 99.5, 110.0, 1.0));
        bars.push(Bar::new(6, 110.0, 110.5, 109.5, 110.0, 1.0));
        let table = BarTable::new(bars).unwrap();
        let zones = detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap();
        assert!(zones.is_empty());
    }

    #[test]
    fn test_parameter_errors() {
        let table = consolidation_then(100.0, 103.0);
        assert!(matches!(
            detect_supply_demand_zones(&table, 0, 0.02, 0.01),
            Err(Error::InvalidPeriod { period: 0, .. })
        ));
        assert!(matches!(
            detect_supply_demand_zones(&table, 3, -0.02, 0.01),
            Err(Error::InvalidParameter { name: "impulse_threshold", .. })
        ));
        assert!(matches!(
            detect_supply_demand_zones(&table, 3, 0.02, f64::INFINITY),
            Err(Error::InvalidParameter { name: "min_zone_width", .. })
        ));
        assert!(matches!(
            detect_supply_demand_zones(&table, 4, 0.02, 0.01),
            Err(Error::InsufficientData { required: 9, actual: 7, .. })
        ));
    }

    #[test]
    fn test_zero_priced_bars_yield_no_zones() {
        let bars: Vec<Bar<f64>> = (0..7).map(|i| Bar::new(i, 0.0, 0.0, 0.0, 0.0, 0.0)).collect();
        let table = BarTable::new(bars).unwrap();
        assert!(detect_supply_demand_zones(&table, 2, 0.0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_zero_mean_window_is_skipped() {
        // impulse bar 3 is valid but window 0..=2 averages to a zero close
        let mut bars: Vec<Bar<f64>> = (0..3).map(|i| Bar::new(i, 0.0, 0.0, 0.0, 0.0, 1.0)).collect();
        bars.push(Bar::new(3, 1.0, 2.5, 1.0, 2.0, 1.0));
        bars.push(Bar::new(4, 2.0, 2.0, 2.0, 2.0, 1.0));
        let table = BarTable::new(bars).unwrap();
        assert!(detect_supply_demand_zones(&table, 2, 0.02, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_detector_config() {
        let table = consolidation_then(100.0, 103.0);
        let detector = ZoneDetector::new().consolidation_candles(3);
        assert_eq!(detector.get_impulse_threshold(), 0.02);
        assert_eq!(
            detector.detect(&table).unwrap(),
            detect_supply_demand_zones(&table, 3, 0.02, 0.01).unwrap()
        );
    }
}
