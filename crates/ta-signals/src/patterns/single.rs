//! Single-candle patterns, and the contextual ones that also look at the
//! previous bar.
//!
//! All comparisons are against fixed fractions of the candle's own body or
//! range; nothing is averaged over a lookback.

use super::core::{Candle, DOJI_BODY_RATIO, LONG_SHADOW_MULTIPLE, SHORT_SHADOW_RATIO};
use super::{PatternDetector, PatternLabel};
use crate::traits::SeriesElement;

/// Fraction of the previous range the open must move away from the previous close.
const DOJI_STAR_GAP_RATIO: f64 = 0.5;

/// Hammer: lower shadow at least twice the body, upper shadow at most a tenth of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hammer;

impl<T: SeriesElement> PatternDetector<T> for Hammer {
    fn name(&self) -> &'static str {
        "hammer"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [curr] = candles else { return None };
        curr.has_hammer_shape().then_some(PatternLabel::Hammer)
    }
}

/// Hanging Man: hammer geometry opening above the previous close.
#[derive(Debug, Clone, Copy, Default)]
pub struct HangingMan;

impl<T: SeriesElement> PatternDetector<T> for HangingMan {
    fn name(&self) -> &'static str {
        "hanging_man"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (curr.has_hammer_shape() && prev.close < curr.open).then_some(PatternLabel::HangingMan)
    }
}

/// Shooting Star: long upper shadow, almost no lower one, opening above the previous close.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootingStar;

impl<T: SeriesElement> PatternDetector<T> for ShootingStar {
    fn name(&self) -> &'static str {
        "shooting_star"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        (curr.has_inverted_hammer_shape() && prev.close < curr.open)
            .then_some(PatternLabel::ShootingStar)
    }
}

/// Doji Star: a doji whose open sits more than half the previous range away
/// from the previous close.
#[derive(Debug, Clone, Copy, Default)]
pub struct DojiStar;

impl<T: SeriesElement> PatternDetector<T> for DojiStar {
    fn name(&self) -> &'static str {
        "doji_star"
    }

    fn window(&self) -> usize {
        2
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [prev, curr] = candles else { return None };
        let gapped = (prev.close - curr.open).abs() > prev.range * T::ratio(DOJI_STAR_GAP_RATIO);
        (curr.is_doji() && gapped).then_some(PatternLabel::DojiStar)
    }
}

/// Long-Legged Doji: a doji whose range exceeds twice its body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongLeggedDoji;

impl<T: SeriesElement> PatternDetector<T> for LongLeggedDoji {
    fn name(&self) -> &'static str {
        "long_legged_doji"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [c] = candles else { return None };
        (c.is_doji() && c.range > c.body * T::ratio(LONG_SHADOW_MULTIPLE))
            .then_some(PatternLabel::LongLeggedDoji)
    }
}

/// Dragonfly Doji: a doji with no upper shadow to speak of and a long lower one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragonflyDoji;

impl<T: SeriesElement> PatternDetector<T> for DragonflyDoji {
    fn name(&self) -> &'static str {
        "dragonfly_doji"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [c] = candles else { return None };
        (c.is_doji()
            && c.upper_shadow <= c.range * T::ratio(SHORT_SHADOW_RATIO)
            && c.lower_shadow > c.body * T::ratio(LONG_SHADOW_MULTIPLE))
            .then_some(PatternLabel::DragonflyDoji)
    }
}

/// Gravestone Doji: a doji with no lower shadow to speak of and a long upper one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GravestoneDoji;

impl<T: SeriesElement> PatternDetector<T> for GravestoneDoji {
    fn name(&self) -> &'static str {
        "gravestone_doji"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [c] = candles else { return None };
        (c.is_doji()
            && c.lower_shadow <= c.range * T::ratio(SHORT_SHADOW_RATIO)
            && c.upper_shadow > c.body * T::ratio(LONG_SHADOW_MULTIPLE))
            .then_some(PatternLabel::GravestoneDoji)
    }
}

/// Spinning Top: a small body with both shadows longer than it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinningTop;

impl<T: SeriesElement> PatternDetector<T> for SpinningTop {
    fn name(&self) -> &'static str {
        "spinning_top"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [c] = candles else { return None };
        (c.body <= c.range * T::ratio(DOJI_BODY_RATIO)
            && c.lower_shadow > c.body
            && c.upper_shadow > c.body)
            .then_some(PatternLabel::SpinningTop)
    }
}
