//! Candle geometry shared by every pattern predicate.
//!
//! A [`Candle`] is computed once per bar and then read by every detector,
//! so body and shadow arithmetic happens a single time per scan.

use crate::bars::{Bar, BarTable};
use crate::traits::SeriesElement;

/// Fraction of the range under which a body counts as a doji.
pub const DOJI_BODY_RATIO: f64 = 0.1;

/// Fraction of the body (or range) under which a shadow counts as absent.
pub const SHORT_SHADOW_RATIO: f64 = 0.1;

/// Multiple of the body a shadow needs to count as long.
pub const LONG_SHADOW_MULTIPLE: f64 = 2.0;

/// One bar with its body and shadow measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle<T> {
    /// Opening price.
    pub open: T,
    /// Highest price.
    pub high: T,
    /// Lowest price.
    pub low: T,
    /// Closing price.
    pub close: T,
    /// `|close - open|`
    pub body: T,
    /// `high - max(open, close)`
    pub upper_shadow: T,
    /// `min(open, close) - low`
    pub lower_shadow: T,
    /// `high - low`
    pub range: T,
}

impl<T: SeriesElement> Candle<T> {
    /// Measures a candle from its four prices.
    #[must_use]
    pub fn new(open: T, high: T, low: T, close: T) -> Self {
        Self {
            open,
            high,
            low,
            close,
            body: (close - open).abs(),
            upper_shadow: high - open.max(close),
            lower_shadow: open.min(close) - low,
            range: high - low,
        }
    }

    /// Close above open.
    #[inline]
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Close below open.
    #[inline]
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// `(open + close) / 2`
    #[inline]
    #[must_use]
    pub fn midpoint(&self) -> T {
        (self.open + self.close) / T::two()
    }

    /// Body no larger than a tenth of the range.
    #[inline]
    #[must_use]
    pub fn is_doji(&self) -> bool {
        self.body <= self.range * T::ratio(DOJI_BODY_RATIO)
    }

    /// Long lower shadow and almost no upper shadow, relative to the body.
    #[inline]
    #[must_use]
    pub fn has_hammer_shape(&self) -> bool {
        self.lower_shadow >= self.body * T::ratio(LONG_SHADOW_MULTIPLE)
            && self.upper_shadow <= self.body * T::ratio(SHORT_SHADOW_RATIO)
    }

    /// Long upper shadow and almost no lower shadow, relative to the body.
    #[inline]
    #[must_use]
    pub fn has_inverted_hammer_shape(&self) -> bool {
        self.upper_shadow >= self.body * T::ratio(LONG_SHADOW_MULTIPLE)
            && self.lower_shadow <= self.body * T::ratio(SHORT_SHADOW_RATIO)
    }
}

impl<T: SeriesElement> From<Bar<T>> for Candle<T> {
    fn from(bar: Bar<T>) -> Self {
        Self::new(bar.open, bar.high, bar.low, bar.close)
    }
}

/// Measures every bar of a table.
#[must_use]
pub fn candles<T: SeriesElement>(table: &BarTable<T>) -> Vec<Candle<T>> {
    table
        .open()
        .iter()
        .zip(table.high())
        .zip(table.low())
        .zip(table.close())
        .map(|(((&o, &h), &l), &c)| Candle::new(o, h, l, c))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;

    #[test]
    fn test_geometry_bullish() {
        let c = Candle::new(100.0_f64, 110.0, 95.0, 105.0);
        assert_eq!(c.body, 5.0);
        assert_eq!(c.upper_shadow, 5.0);
        assert_eq!(c.lower_shadow, 5.0);
        assert_eq!(c.range, 15.0);
        assert!(c.is_bullish());
        assert!(!c.is_bearish());
        assert_eq!(c.midpoint(), 102.5);
    }

    #[test]
    fn test_geometry_bearish() {
        let c = Candle::new(105.0_f64, 110.0, 95.0, 100.0);
        assert_eq!(c.upper_shadow, 5.0);
        assert_eq!(c.lower_shadow, 5.0);
        assert!(c.is_bearish());
    }

    #[test]
    fn test_doji() {
        assert!(Candle::new(100.0_f64, 110.0, 90.0, 100.0).is_doji());
        assert!(Candle::new(100.0_f64, 110.0, 90.0, 102.0).is_doji());
        assert!(!Candle::new(100.0_f64, 110.0, 90.0, 105.0).is_doji());
        // zero range, zero body
        assert!(Candle::new(100.0_f64, 100.0, 100.0, 100.0).is_doji());
    }

    #[test]
    fn test_hammer_shape() {
        assert!(Candle::new(10.0_f64, 11.0, 7.0, 11.0).has_hammer_shape());
        assert!(!Candle::new(10.0_f64, 11.5, 7.0, 11.0).has_hammer_shape());
        assert!(Candle::new(11.0_f64, 14.0, 10.0, 10.0).has_inverted_hammer_shape());
    }

    #[test]
    fn test_candles_from_table() {
        let table = BarTable::new(vec![
            Bar::new(1, 10.0_f64, 11.0, 9.0, 10.5, 1.0),
            Bar::new(2, 10.5, 12.0, 10.0, 11.5, 1.0),
        ])
        .unwrap();
        let measured = candles(&table);
        assert_eq!(measured.len(), 2);
        assert_eq!(measured[1], Candle::from(table.bar(1)));
    }
}
