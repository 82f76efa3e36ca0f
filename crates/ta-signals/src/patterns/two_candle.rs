//! Two-candle patterns.
//!
//! Each detector compares the previous bar (`prev`) with the current one
//! (`curr`) using strict inequalities on opens and closes.

use super::core::Candle;
use super::{PatternDetector, PatternLabel};
use crate::traits::SeriesElement;

/// Engulfing: the current body reverses and swallows the previous one.
///
/// Emits [`PatternLabel::BullishEngulfing`] or [`PatternLabel::BearishEngulfing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Engulfing;

impl<T: SeriesElement> PatternDetector<T> for Engulfing {
    fn name(&self) -> &'static str {
        "engulfing"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        if prev.is_bearish()
            && curr.is_bullish()
            && curr.close > prev.open
            && curr.open < prev.close
        {
            Some(PatternLabel::BullishEngulfing)
        } else if prev.is_bullish()
            && curr.is_bearish()
            && curr.close < prev.open
            && curr.open > prev.close
        {
            Some(PatternLabel::BearishEngulfing)
        } else {
            None
        }
    }
}

/// Bullish Harami: a bullish body inside the previous bearish body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BullishHarami;

impl<T: SeriesElement> PatternDetector<T> for BullishHarami {
    fn name(&self) -> &'static str {
        "bullish_harami"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (prev.is_bearish()
            && curr.is_bullish()
            && curr.open > prev.close
            && curr.close < prev.open)
            .then_some(PatternLabel::BullishHarami)
    }
}

/// Bearish Harami: a bearish body inside the previous bullish body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearishHarami;

impl<T: SeriesElement> PatternDetector<T> for BearishHarami {
    fn name(&self) -> &'static str {
        "bearish_harami"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (prev.is_bullish()
            && curr.is_bearish()
            && curr.open < prev.close
            && curr.close > prev.open)
            .then_some(PatternLabel::BearishHarami)
    }
}

/// Harami Cross: a doji whose whole high-low range sits inside the previous body.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaramiCross;

impl<T: SeriesElement> PatternDetector<T> for HaramiCross {
    fn name(&self) -> &'static str {
        "harami_cross"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        if !curr.is_doji() {
            return None;
        }
        if prev.is_bearish() && curr.high < prev.open && curr.low > prev.close {
            Some(PatternLabel::BullishHaramiCross)
        } else if prev.is_bullish() && curr.high < prev.close && curr.low > prev.open {
            Some(PatternLabel::BearishHaramiCross)
        } else {
            None
        }
    }
}

/// Dark Cloud Cover: opens above a bullish bar's close and closes below its midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct DarkCloudCover;

impl<T: SeriesElement> PatternDetector<T> for DarkCloudCover {
    fn name(&self) -> &'static str {
        "dark_cloud_cover"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (prev.is_bullish()
            && curr.open > prev.close
            && curr.close < prev.close
            && curr.close < prev.midpoint())
            .then_some(PatternLabel::DarkCloudCover)
    }
}

/// Piercing: opens below a bearish bar's close and closes above its open.
#[derive(Debug, Clone, Copy, Default)]
pub struct Piercing;

impl<T: SeriesElement> PatternDetector<T> for Piercing {
    fn name(&self) -> &'static str {
        "piercing"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (prev.is_bearish()
            && curr.open < prev.close
            && curr.close > prev.open
            && curr.close > prev.midpoint())
            .then_some(PatternLabel::Piercing)
    }
}
