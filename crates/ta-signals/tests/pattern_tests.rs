//! Candlestick pattern tests over whole tables.

mod common;

use ta_signals::bars::{Bar, BarTable};
use ta_signals::patterns::{
    detect_pattern, BearishHarami, Candle, Engulfing, PatternDetector, PatternEvent, PatternLabel,
    PatternRegistry,
};

use common::table_from_bodies;

fn labels_at(events: &[PatternEvent], index: usize) -> Vec<PatternLabel> {
    events
        .iter()
        .filter(|e| e.index == index)
        .map(|e| e.label)
        .collect()
}

#[test]
fn engulfing_reference_example() {
    let table = table_from_bodies(&[(10.0, 8.0), (7.0, 11.0)]);
    let events = detect_pattern(&table, &Engulfing);
    assert_eq!(
        events,
        vec![PatternEvent {
            index: 1,
            timestamp: 60,
            label: PatternLabel::BullishEngulfing,
        }]
    );
    assert_eq!(events[0].label.to_string(), "Bullish");
}

#[test]
fn harami_reference_example() {
    let table = table_from_bodies(&[(8.0, 12.0), (11.0, 9.0)]);
    let events = detect_pattern(&table, &BearishHarami);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].index, 1);
    assert_eq!(events[0].label.to_string(), "Bearish Harami");
}

#[test]
fn same_color_inside_body_is_not_harami() {
    // bullish (9, 11) inside bullish (8, 12)
    let table = table_from_bodies(&[(8.0, 12.0), (9.0, 11.0)]);
    let labels = labels_at(&PatternRegistry::standard().scan(&table), 1);
    assert!(!labels.contains(&PatternLabel::BearishHarami));
    assert!(!labels.contains(&PatternLabel::BullishHarami));
}

#[test]
fn standard_scan_finds_reference_patterns() {
    let table = table_from_bodies(&[(10.0, 8.0), (7.0, 11.0), (8.0, 12.0), (11.0, 9.0)]);
    let events = PatternRegistry::standard().scan(&table);

    assert!(labels_at(&events, 1).contains(&PatternLabel::BullishEngulfing));
    assert!(labels_at(&events, 3).contains(&PatternLabel::BearishHarami));
}

#[test]
fn events_are_in_input_order() {
    let bodies: Vec<(f64, f64)> = (0..60)
        .map(|i| {
            let base = 100.0 + (f64::from(i) / 2.0).sin() * 4.0;
            if i % 2 == 0 {
                (base, base + 1.5)
            } else {
                (base + 1.0, base - 1.0)
            }
        })
        .collect();
    let table = table_from_bodies(&bodies);
    let events = PatternRegistry::standard().scan(&table);

    assert!(events.windows(2).all(|w| w[0].index <= w[1].index));
    for event in &events {
        assert_eq!(event.timestamp, table.timestamps()[event.index]);
    }
}

#[test]
fn scanning_twice_is_identical() {
    let table = table_from_bodies(&[
        (10.0, 12.0),
        (11.0, 13.0),
        (12.0, 14.0),
        (15.0, 11.0),
        (11.0, 11.05),
        (10.0, 8.0),
    ]);
    let registry = PatternRegistry::standard();
    assert_eq!(registry.scan(&table), registry.scan(&table));
}

#[test]
fn scan_leaves_table_untouched() {
    let table = table_from_bodies(&[(10.0, 8.0), (7.0, 11.0), (11.0, 10.0)]);
    let before = table.clone();
    let _ = PatternRegistry::standard().scan(&table);
    assert_eq!(table, before);
}

/// A user-defined detector: any bar closing exactly at its high.
struct ClosesAtHigh;

impl PatternDetector<f64> for ClosesAtHigh {
    fn name(&self) -> &'static str {
        "closes_at_high"
    }

    fn window(&self) -> usize {
        1
    }

    fn detect(&self, candles: &[Candle<f64>]) -> Option<PatternLabel> {
        let [c] = candles else { return None };
        (c.upper_shadow == 0.0 && c.is_bullish()).then_some(PatternLabel::Hammer)
    }
}

#[test]
fn custom_detector_registers_without_dispatch_changes() {
    let table = BarTable::new(vec![
        Bar::new(0, 10.0, 12.0, 9.5, 12.0, 1.0),
        Bar::new(60, 12.0, 12.5, 11.5, 12.2, 1.0),
    ])
    .unwrap();
    let registry = PatternRegistry::new().with(ClosesAtHigh);
    assert_eq!(registry.names(), vec!["closes_at_high"]);

    let events = registry.scan(&table);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].index, 0);
}

#[test]
fn detectors_work_on_f32() {
    let table = BarTable::new(vec![
        Bar::new(0, 10.0_f32, 10.5, 7.5, 8.0, 1.0),
        Bar::new(60, 7.0, 11.5, 6.5, 11.0, 1.0),
    ])
    .unwrap();
    let events = detect_pattern(&table, &Engulfing);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].label, PatternLabel::BullishEngulfing);
}
