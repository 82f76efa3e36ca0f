//! Five-candle continuation patterns: a long first bar, three small bars
//! held inside its body, and a last bar extending the move.

use super::core::Candle;
use super::{PatternDetector, PatternLabel};
use crate::traits::SeriesElement;

/// True when both the open and close of every middle bar lie strictly inside `(lo, hi)`.
fn held_inside<T: SeriesElement>(middle: &[Candle<T>], lo: T, hi: T) -> bool {
    middle
        .iter()
        .all(|m| lo < m.open && m.open < hi && lo < m.close && m.close < hi)
}

/// Rising Three Methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisingThreeMethods;

impl<T: SeriesElement> PatternDetector<T> for RisingThreeMethods {
    fn name(&self) -> &'static str {
        "rising_three_methods"
    }

    fn window(&self) -> usize {
        5
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [first, middle @ .., last] = candles else {
            return None;
        };
        (middle.len() == 3
            && first.is_bullish()
            && last.is_bullish()
            && last.close > first.close
            && held_inside(middle, first.open, first.close))
            .then_some(PatternLabel::RisingThreeMethods)
    }
}

/// Falling Three Methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallingThreeMethods;

impl<T: SeriesElement> PatternDetector<T> for FallingThreeMethods {
    fn name(&self) -> &'static str {
        "falling_three_methods"
    }

    fn window(&self) -> usize {
        5
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [first, middle @ .., last] = candles else {
            return None;
        };
        (middle.len() == 3
            && first.is_bearish()
            && last.is_bearish()
            && last.close < first.close
            && held_inside(middle, first.close, first.open))
            .then_some(PatternLabel::FallingThreeMethods)
    }
}
