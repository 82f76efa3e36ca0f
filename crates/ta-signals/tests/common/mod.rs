//! Shared test utilities for ta-signals integration tests.

use ta_signals::bars::{Bar, BarTable};

/// Approximate equality; two NaN values count as equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Builds a table from `(open, close)` bodies with 0.5 shadows on each side.
///
/// Timestamps are one minute apart starting at 0.
#[allow(dead_code)]
pub fn table_from_bodies(bodies: &[(f64, f64)]) -> BarTable<f64> {
    let bars = bodies
        .iter()
        .enumerate()
        .map(|(i, &(o, c))| Bar::new(i as i64 * 60, o, o.max(c) + 0.5, o.min(c) - 0.5, c, 1.0))
        .collect();
    BarTable::new(bars).expect("valid bodies")
}

/// Builds a table whose opens are the previous close.
#[allow(dead_code)]
pub fn table_from_closes(closes: &[f64]) -> BarTable<f64> {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let o = if i == 0 { c } else { closes[i - 1] };
            Bar::new(i as i64 * 60, o, o.max(c) + 0.5, o.min(c) - 0.5, c, 100.0)
        })
        .collect();
    BarTable::new(bars).expect("valid closes")
}

/// A smooth oscillation around 100.
#[allow(dead_code)]
pub fn wave(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + (i as f64 / 3.0).sin() * 5.0)
        .collect()
}
