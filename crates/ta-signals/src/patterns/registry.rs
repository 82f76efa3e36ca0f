//! Registry of pattern detectors and the table scan that drives them.

use std::fmt;

use super::core::{candles, Candle};
use super::five_candle::{FallingThreeMethods, RisingThreeMethods};
use super::single::{
    DojiStar, DragonflyDoji, GravestoneDoji, Hammer, HangingMan, LongLeggedDoji, ShootingStar,
    SpinningTop,
};
use super::three_candle::{EveningStar, MorningStar, ThreeBlackCrows, ThreeWhiteSoldiers};
use super::two_candle::{
    BearishHarami, BullishHarami, DarkCloudCover, Engulfing, HaramiCross, Piercing,
};
use super::{PatternDetector, PatternEvent};
use crate::bars::BarTable;
use crate::traits::SeriesElement;

/// An ordered list of boxed detectors.
///
/// Events from [`PatternRegistry::scan`] are ordered by bar index, then by
/// registration order.
pub struct PatternRegistry<T: SeriesElement> {
    detectors: Vec<Box<dyn PatternDetector<T>>>,
}

impl<T: SeriesElement> PatternRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Creates a registry holding every built-in detector.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(Engulfing)
            .with(ThreeWhiteSoldiers)
            .with(BullishHarami)
            .with(BearishHarami)
            .with(HaramiCross)
            .with(Hammer)
            .with(MorningStar)
            .with(HangingMan)
            .with(ShootingStar)
            .with(EveningStar)
            .with(ThreeBlackCrows)
            .with(DarkCloudCover)
            .with(Piercing)
            .with(DojiStar)
            .with(LongLeggedDoji)
            .with(DragonflyDoji)
            .with(GravestoneDoji)
            .with(SpinningTop)
            .with(FallingThreeMethods)
            .with(RisingThreeMethods)
    }

    /// Appends a detector, builder style.
    #[must_use]
    pub fn with<D: PatternDetector<T> + 'static>(mut self, detector: D) -> Self {
        self.register(Box::new(detector));
        self
    }

    /// Appends a boxed detector.
    pub fn register(&mut self, detector: Box<dyn PatternDetector<T>>) {
        self.detectors.push(detector);
    }

    /// Number of registered detectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// True if no detector is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Detector names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Runs every detector over every bar of `table`.
    #[must_use]
    pub fn scan(&self, table: &BarTable<T>) -> Vec<PatternEvent> {
        let measured = candles(table);
        let timestamps = table.timestamps();

        let mut events = Vec::new();
        for index in 0..measured.len() {
            for detector in &self.detectors {
                if let Some(event) = evaluate(detector.as_ref(), &measured, timestamps, index) {
                    events.push(event);
                }
            }
        }

        tracing::debug!(
            bars = measured.len(),
            detectors = self.detectors.len(),
            events = events.len(),
            "pattern scan"
        );
        events
    }
}

impl<T: SeriesElement> Default for PatternRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesElement> fmt::Debug for PatternRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRegistry")
            .field("detectors", &self.detectors.len())
            .finish()
    }
}

/// Evaluates one detector at `index`; bars without enough history are skipped.
fn evaluate<T: SeriesElement>(
    detector: &dyn PatternDetector<T>,
    measured: &[Candle<T>],
    timestamps: &[i64],
    index: usize,
) -> Option<PatternEvent> {
    let window = detector.window();
    if window == 0 || index + 1 < window {
        return None;
    }
    let slice = &measured[index + 1 - window..=index];
    detector.detect(slice).map(|label| PatternEvent {
        index,
        timestamp: timestamps[index],
        label,
    })
}

/// Runs a single detector over `table`.
#[must_use]
pub fn detect_pattern<T: SeriesElement>(
    table: &BarTable<T>,
    detector: &dyn PatternDetector<T>,
) -> Vec<PatternEvent> {
    let measured = candles(table);
    let timestamps = table.timestamps();
    (0..measured.len())
        .filter_map(|index| evaluate(detector, &measured, timestamps, index))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::bars::Bar;
    use crate::patterns::PatternLabel;

    fn table(bodies: &[(f64, f64)]) -> BarTable<f64> {
        BarTable::new(
            bodies
                .iter()
                .enumerate()
                .map(|(i, &(o, c))| Bar::new(i as i64 * 60, o, o.max(c) + 0.5, o.min(c) - 0.5, c, 1.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_standard_registry_has_every_detector() {
        let registry = PatternRegistry::<f64>::standard();
        assert_eq!(registry.len(), 20);
        let names = registry.names();
        assert_eq!(names[0], "engulfing");
        assert!(names.contains(&"rising_three_methods"));
    }

    #[test]
    fn test_detect_pattern_reports_index_and_timestamp() {
        let t = table(&[(10.0, 8.0), (7.0, 11.0), (11.0, 11.5)]);
        let events = detect_pattern(&t, &Engulfing);
        assert_eq!(
            events,
            vec![PatternEvent {
                index: 1,
                timestamp: 60,
                label: PatternLabel::BullishEngulfing
            }]
        );
    }

    #[test]
    fn test_scan_orders_by_index_then_registration() {
        let t = table(&[(10.0, 12.0), (11.0, 13.0), (12.0, 14.0), (15.0, 11.0)]);
        let registry = PatternRegistry::new()
            .with(Engulfing)
            .with(ThreeWhiteSoldiers)
            .with(DarkCloudCover);
        let events = registry.scan(&t);
        let found: Vec<(usize, PatternLabel)> = events.iter().map(|e| (e.index, e.label)).collect();
        assert_eq!(
            found,
            vec![
                (2, PatternLabel::ThreeWhiteSoldiers),
                (3, PatternLabel::BearishEngulfing),
                (3, PatternLabel::DarkCloudCover),
            ]
        );
    }

    #[test]
    fn test_scan_is_idempotent() {
        let t = table(&[(10.0, 8.0), (7.0, 11.0), (11.0, 10.0), (10.0, 10.02), (9.0, 12.0)]);
        let registry = PatternRegistry::standard();
        assert_eq!(registry.scan(&t), registry.scan(&t));
    }

    #[test]
    fn test_short_table_skips_long_windows() {
        let t = table(&[(10.0, 12.0)]);
        assert!(detect_pattern(&t, &RisingThreeMethods).is_empty());
        assert!(detect_pattern(&t, &Engulfing).is_empty());
    }
}
