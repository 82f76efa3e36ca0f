//! OHLCV bars and the validated bar table every detector reads from.
//!
//! A [`BarTable`] can only be built through a validating constructor and
//! exposes read-only column slices afterwards. Detectors borrow it, so a
//! table handed to several of them (or to several threads) is never
//! modified.
//!
//! # Example
//!
//! ```
//! use ta_signals::bars::{Bar, BarTable};
//!
//! let table = BarTable::new(vec![
//!     Bar::new(1_000, 10.0_f64, 11.0, 9.5, 10.5, 100.0),
//!     Bar::new(2_000, 10.5, 12.0, 10.0, 11.5, 120.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.close(), &[10.5, 11.5]);
//! ```

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// One OHLCV interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bar<T> {
    /// Interval start, as an integer epoch value (milliseconds for exchange data).
    pub timestamp: i64,
    /// Opening price.
    pub open: T,
    /// Highest traded price.
    pub high: T,
    /// Lowest traded price.
    pub low: T,
    /// Closing price.
    pub close: T,
    /// Traded volume.
    pub volume: T,
}

impl<T: SeriesElement> Bar<T> {
    /// Creates a bar. No validation happens until it enters a [`BarTable`].
    #[must_use]
    pub const fn new(timestamp: i64, open: T, high: T, low: T, close: T, volume: T) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks the OHLC ordering and finiteness of this bar.
    fn check(&self, index: usize) -> Result<()> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidBar {
                index,
                reason: "prices must be finite",
            });
        }
        if !self.volume.is_finite() || self.volume < T::zero() {
            return Err(Error::InvalidBar {
                index,
                reason: "volume must be finite and non-negative",
            });
        }
        if self.high < self.low {
            return Err(Error::InvalidBar {
                index,
                reason: "high is below low",
            });
        }
        if self.low > self.open.min(self.close) {
            return Err(Error::InvalidBar {
                index,
                reason: "low is above the candle body",
            });
        }
        if self.high < self.open.max(self.close) {
            return Err(Error::InvalidBar {
                index,
                reason: "high is below the candle body",
            });
        }
        Ok(())
    }
}

/// A validated, time-ordered, columnar table of bars.
///
/// Invariants upheld by every constructor:
/// - at least one bar
/// - strictly increasing timestamps
/// - `low <= min(open, close) <= max(open, close) <= high` for every bar
/// - finite prices, finite non-negative volume
#[derive(Debug, Clone, PartialEq)]
pub struct BarTable<T> {
    timestamps: Vec<i64>,
    open: Vec<T>,
    high: Vec<T>,
    low: Vec<T>,
    close: Vec<T>,
    volume: Vec<T>,
}

impl<T: SeriesElement> BarTable<T> {
    /// Builds a table from row-oriented bars.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if `bars` is empty
    /// - `Error::NonMonotonicTimestamp` if a timestamp does not increase
    /// - `Error::InvalidBar` if a bar breaks the OHLC invariant
    pub fn new(bars: Vec<Bar<T>>) -> Result<Self> {
        if bars.is_empty() {
            return Err(Error::EmptyInput);
        }

        let len = bars.len();
        let mut table = Self {
            timestamps: Vec::with_capacity(len),
            open: Vec::with_capacity(len),
            high: Vec::with_capacity(len),
            low: Vec::with_capacity(len),
            close: Vec::with_capacity(len),
            volume: Vec::with_capacity(len),
        };

        for bar in bars {
            table.timestamps.push(bar.timestamp);
            table.open.push(bar.open);
            table.high.push(bar.high);
            table.low.push(bar.low);
            table.close.push(bar.close);
            table.volume.push(bar.volume);
        }

        table.validate()?;
        Ok(table)
    }

    /// Builds a table from column vectors.
    ///
    /// # Errors
    ///
    /// - `Error::EmptyInput` if the columns are empty
    /// - `Error::LengthMismatch` if the columns differ in length
    /// - `Error::NonMonotonicTimestamp` / `Error::InvalidBar` as for [`BarTable::new`]
    pub fn from_columns(
        timestamps: Vec<i64>,
        open: Vec<T>,
        high: Vec<T>,
        low: Vec<T>,
        close: Vec<T>,
        volume: Vec<T>,
    ) -> Result<Self> {
        let len = timestamps.len();
        if len == 0 {
            return Err(Error::EmptyInput);
        }
        if [open.len(), high.len(), low.len(), close.len(), volume.len()]
            .iter()
            .any(|&l| l != len)
        {
            return Err(Error::LengthMismatch {
                description: format!(
                    "timestamps={len}, open={}, high={}, low={}, close={}, volume={}",
                    open.len(),
                    high.len(),
                    low.len(),
                    close.len(),
                    volume.len()
                ),
            });
        }

        let table = Self {
            timestamps,
            open,
            high,
            low,
            close,
            volume,
        };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<()> {
        for (index, pair) in self.timestamps.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(Error::NonMonotonicTimestamp {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        for index in 0..self.len() {
            self.bar(index).check(index)?;
        }
        Ok(())
    }

    /// Number of bars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always false for a constructed table; provided for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamps column.
    #[inline]
    #[must_use]
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Open column.
    #[inline]
    #[must_use]
    pub fn open(&self) -> &[T] {
        &self.open
    }

    /// High column.
    #[inline]
    #[must_use]
    pub fn high(&self) -> &[T] {
        &self.high
    }

    /// Low column.
    #[inline]
    #[must_use]
    pub fn low(&self) -> &[T] {
        &self.low
    }

    /// Close column.
    #[inline]
    #[must_use]
    pub fn close(&self) -> &[T] {
        &self.close
    }

    /// Volume column.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> &[T] {
        &self.volume
    }

    /// The bar at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn bar(&self, index: usize) -> Bar<T> {
        Bar {
            timestamp: self.timestamps[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        }
    }

    /// Iterates the bars in time order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Bar<T>> + '_ {
        (0..self.len()).map(move |i| self.bar(i))
    }

    /// Close of the most recent bar.
    #[must_use]
    pub fn last_close(&self) -> T {
        self.close[self.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;

    fn bar(ts: i64, o: f64, h: f64, l: f64, c: f64) -> Bar<f64> {
        Bar::new(ts, o, h, l, c, 1.0)
    }

    #[test]
    fn test_new_builds_columns() {
        let table = BarTable::new(vec![
            bar(1, 10.0, 11.0, 9.0, 10.5),
            bar(2, 10.5, 12.0, 10.0, 11.5),
            bar(3, 11.5, 11.8, 10.2, 10.4),
        ])
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.timestamps(), &[1, 2, 3]);
        assert_eq!(table.open(), &[10.0, 10.5, 11.5]);
        assert_eq!(table.high(), &[11.0, 12.0, 11.8]);
        assert_eq!(table.low(), &[9.0, 10.0, 10.2]);
        assert_eq!(table.close(), &[10.5, 11.5, 10.4]);
        assert_eq!(table.last_close(), 10.4);
        assert_eq!(table.iter().count(), 3);
        assert_eq!(table.bar(1), bar(2, 10.5, 12.0, 10.0, 11.5));
    }

    #[test]
    fn test_empty_rejected() {
        let result = BarTable::<f64>::new(vec![]);
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let result = BarTable::new(vec![
            bar(5, 10.0, 11.0, 9.0, 10.5),
            bar(5, 10.5, 12.0, 10.0, 11.5),
        ]);
        assert!(matches!(
            result,
            Err(Error::NonMonotonicTimestamp {
                index: 1,
                previous: 5,
                current: 5
            })
        ));
    }

    #[test]
    fn test_decreasing_timestamp_rejected() {
        let result = BarTable::new(vec![
            bar(1, 10.0, 11.0, 9.0, 10.5),
            bar(3, 10.0, 11.0, 9.0, 10.5),
            bar(2, 10.5, 12.0, 10.0, 11.5),
        ]);
        assert!(matches!(
            result,
            Err(Error::NonMonotonicTimestamp { index: 2, .. })
        ));
    }

    #[test]
    fn test_high_below_body_rejected() {
        let result = BarTable::new(vec![bar(1, 10.0, 10.2, 9.0, 10.5)]);
        assert!(matches!(result, Err(Error::InvalidBar { index: 0, .. })));
    }

    #[test]
    fn test_low_above_body_rejected() {
        let result = BarTable::new(vec![
            bar(1, 10.0, 11.0, 9.0, 10.5),
            bar(2, 10.0, 11.0, 10.1, 10.5),
        ]);
        assert!(matches!(result, Err(Error::InvalidBar { index: 1, .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = BarTable::new(vec![bar(1, f64::NAN, 11.0, 9.0, 10.5)]);
        assert!(matches!(result, Err(Error::InvalidBar { .. })));
        let result = BarTable::new(vec![Bar::new(1, 10.0, 11.0, 9.0, 10.5, -1.0)]);
        assert!(matches!(result, Err(Error::InvalidBar { .. })));
    }

    #[test]
    fn test_from_columns_length_mismatch() {
        let result = BarTable::from_columns(
            vec![1, 2],
            vec![10.0_f64, 10.0],
            vec![11.0, 11.0],
            vec![9.0],
            vec![10.0, 10.0],
            vec![1.0, 1.0],
        );
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_from_columns_matches_new() {
        let from_rows = BarTable::new(vec![
            bar(1, 10.0, 11.0, 9.0, 10.5),
            bar(2, 10.5, 12.0, 10.0, 11.5),
        ])
        .unwrap();
        let from_cols = BarTable::from_columns(
            vec![1, 2],
            vec![10.0, 10.5],
            vec![11.0, 12.0],
            vec![9.0, 10.0],
            vec![10.5, 11.5],
            vec![1.0, 1.0],
        )
        .unwrap();
        assert_eq!(from_rows, from_cols);
    }
}
