//! Three-candle patterns. Candles are named `a`, `b`, `c`, oldest first.

use super::core::Candle;
use super::{PatternDetector, PatternLabel};
use crate::traits::SeriesElement;

/// Morning Star: two bearish bars, then a bullish one closing above the first midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct MorningStar;

impl<T: SeriesElement> PatternDetector<T> for MorningStar {
    fn name(&self) -> &'static str {
        "morning_star"
    }

    fn window(&self) -> usize {
        3
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [a, b, c] = candles else { return None };
        (a.is_bearish()
            && b.is_bearish()
            && c.is_bullish()
            && c.close > a.midpoint()
            && b.open < a.close
            && c.open > b.close)
            .then_some(PatternLabel::MorningStar)
    }
}

/// Evening Star: two bullish bars, then a bearish one closing below the first midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct EveningStar;

impl<T: SeriesElement> PatternDetector<T> for EveningStar {
    fn name(&self) -> &'static str {
        "evening_star"
    }

    fn window(&self) -> usize {
        3
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [a, b, c] = candles else { return None };
        (a.is_bullish()
            && b.is_bullish()
            && c.is_bearish()
            && c.close < a.midpoint()
            && b.open > a.close
            && c.open < b.close)
            .then_some(PatternLabel::EveningStar)
    }
}

/// Three White Soldiers: three rising bullish bars, each opening inside the previous body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeWhiteSoldiers;

impl<T: SeriesElement> PatternDetector<T> for ThreeWhiteSoldiers {
    fn name(&self) -> &'static str {
        "three_white_soldiers"
    }

    fn window(&self) -> usize {
        3
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [a, b, c] = candles else { return None };
        (a.is_bullish()
            && b.is_bullish()
            && c.is_bullish()
            && c.close > b.close
            && b.close > a.close
            && c.open < b.close
            && b.open < a.close)
            .then_some(PatternLabel::ThreeWhiteSoldiers)
    }
}

/// Three Black Crows: three falling bearish bars, each opening inside the previous body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeBlackCrows;

impl<T: SeriesElement> PatternDetector<T> for ThreeBlackCrows {
    fn name(&self) -> &'static str {
        "three_black_crows"
    }

    fn window(&self) -> usize {
        3
    }

    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel> {
        let [a, b, c] = candles else { return None };
        (a.is_bearish()
            && b.is_bearish()
            && c.is_bearish()
            && c.close < b.close
            && b.close < a.close
            && c.open > b.close
            && b.open > a.close)
            .then_some(PatternLabel::ThreeBlackCrows)
    }
}
