//! Relative Strength Index (RSI) indicator.
//!
//! A momentum oscillator on a 0 to 100 scale comparing the size of recent
//! gains with the size of recent losses.
//!
//! # Algorithm
//!
//! This variant averages gains and losses with a **simple** rolling mean
//! rather than Wilder's exponential smoothing:
//!
//! ```text
//! Change[0] = 0
//! Change[i] = P[i] - P[i-1]
//! Gain[i]   = max(Change[i], 0)
//! Loss[i]   = max(-Change[i], 0)
//!
//! AvgGain[i] = mean(Gain[i-n+1..=i])
//! AvgLoss[i] = mean(Loss[i-n+1..=i])
//! RS  = AvgGain / AvgLoss
//! RSI = 100 - 100 / (1 + RS)
//! ```
//!
//! The first bar has no predecessor and contributes a zero gain and a zero
//! loss, so the first defined RSI value sits at index `period - 1`.
//!
//! # Zero-loss policy
//!
//! Division by a zero average loss is not special-cased; the IEEE result
//! propagates:
//!
//! - gains but no losses in the window: RS = +inf, RSI = 100
//! - neither gains nor losses (flat window): RS = 0/0, RSI = NaN
//!
//! Zero is detected exactly by counting non-zero losses in the window, so
//! rounding residue from the rolling sum never turns a flat window into a
//! finite reading.
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::rsi;
//!
//! let data = vec![44.0_f64, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5];
//! let result = rsi(&data, 5).unwrap();
//!
//! assert!(result[3].is_nan());
//! assert!(result[4] >= 0.0 && result[4] <= 100.0);
//! ```

use crate::error::Result;
use crate::traits::{validate_window, SeriesElement};

/// Default RSI window.
pub const RSI_DEFAULT_PERIOD: usize = 14;

/// Number of leading NaN values in the RSI output.
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Minimum input length that produces at least one RSI value.
#[inline]
#[must_use]
pub const fn rsi_min_len(period: usize) -> usize {
    period
}

/// Rolling window state for one side (gains or losses).
#[derive(Debug, Clone, Copy)]
struct RollingSide<T> {
    sum: T,
    non_zero: usize,
    nan_count: usize,
}

impl<T: SeriesElement> RollingSide<T> {
    fn new() -> Self {
        Self {
            sum: T::zero(),
            non_zero: 0,
            nan_count: 0,
        }
    }

    fn add(&mut self, value: T) {
        if value.is_nan() {
            self.nan_count += 1;
        } else {
            if value != T::zero() {
                self.non_zero += 1;
            }
            self.sum = self.sum + value;
        }
    }

    fn remove(&mut self, value: T) {
        if value.is_nan() {
            self.nan_count -= 1;
        } else {
            if value != T::zero() {
                self.non_zero -= 1;
            }
            self.sum = self.sum - value;
        }
    }

    /// Window mean; exactly zero when the window holds no non-zero value.
    fn mean(&self, period: T) -> T {
        if self.nan_count > 0 {
            T::nan()
        } else if self.non_zero == 0 {
            T::zero()
        } else {
            (self.sum / period).max(T::zero())
        }
    }
}

/// Splits a change into (gain, loss); NaN changes poison both sides.
#[inline]
fn split_change<T: SeriesElement>(change: T) -> (T, T) {
    if change.is_nan() {
        (T::nan(), T::nan())
    } else if change > T::zero() {
        (change, T::zero())
    } else {
        (T::zero(), -change)
    }
}

/// Computes the simple-mean Relative Strength Index.
///
/// Output has the same length as the input; the first `period - 1` values
/// are NaN. See the module docs for the zero-loss policy.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the period
#[must_use = "this returns a Result with the RSI values, which should be used"]
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_window(data, period, "rsi")?;

    let period_t = T::from_usize(period)?;
    let hundred = T::hundred();

    let changes: Vec<(T, T)> = std::iter::once((T::zero(), T::zero()))
        .chain(data.windows(2).map(|w| split_change(w[1] - w[0])))
        .collect();

    let mut gains = RollingSide::new();
    let mut losses = RollingSide::new();
    let mut result = vec![T::nan(); data.len()];
    let mut flat_windows = 0usize;

    for i in 0..data.len() {
        let (gain, loss) = changes[i];
        gains.add(gain);
        losses.add(loss);

        if i >= period {
            let (old_gain, old_loss) = changes[i - period];
            gains.remove(old_gain);
            losses.remove(old_loss);
        }

        if i + 1 >= period {
            let avg_gain = gains.mean(period_t);
            let avg_loss = losses.mean(period_t);
            if avg_loss == T::zero() {
                flat_windows += 1;
            }
            let rs = avg_gain / avg_loss;
            result[i] = hundred - hundred / (T::one() + rs);
        }
    }

    if flat_windows > 0 {
        tracing::debug!(period, flat_windows, "rsi windows without losses");
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, EPSILON};

    #[test]
    fn test_rsi_known_values() {
        // changes: 0, +1, -1, +2, -1
        let data = vec![10.0_f64, 11.0, 10.0, 12.0, 11.0];
        let result = rsi(&data, 3).unwrap();

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        // window [0, +1, -1]: gain 1/3, loss 1/3 -> 50
        assert!(approx_eq(result[2], 50.0, EPSILON));
        // window [+1, -1, +2]: gain 1, loss 1/3 -> rs 3 -> 75
        assert!(approx_eq(result[3], 75.0, EPSILON));
        // window [-1, +2, -1]: gain 2/3, loss 2/3 -> 50
        assert!(approx_eq(result[4], 50.0, EPSILON));
    }

    #[test]
    fn test_rsi_first_bar_counts_as_no_change() {
        // window at index 1 is [0, +1]: gain 0.5, loss 0 -> 100
        let data = vec![10.0_f64, 11.0, 10.0];
        let result = rsi(&data, 2).unwrap();
        assert!(result[0].is_nan());
        assert!(approx_eq(result[1], 100.0, EPSILON));
        // window [+1, -1] -> 50
        assert!(approx_eq(result[2], 50.0, EPSILON));
    }

    #[test]
    fn test_rsi_only_gains_is_hundred() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&data, 14).unwrap();
        for v in &result[13..] {
            assert!(approx_eq(*v, 100.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_only_losses_is_zero() {
        let data: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = rsi(&data, 14).unwrap();
        for v in &result[14..] {
            assert!(approx_eq(*v, 0.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_flat_window_is_nan() {
        let data = vec![5.0_f64; 10];
        let result = rsi(&data, 4).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_flat_after_movement_returns_to_nan() {
        // After the last move leaves the window, the reading becomes NaN again
        // even though the rolling sums went through additions and subtractions.
        let data = vec![1.1_f64, 1.3, 1.7, 1.7, 1.7, 1.7, 1.7];
        let result = rsi(&data, 3).unwrap();
        assert!(approx_eq(result[2], 100.0, EPSILON));
        assert!(result[5].is_nan());
        assert!(result[6].is_nan());
    }

    #[test]
    fn test_rsi_bounded() {
        let data = vec![
            44.34_f64, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89,
            46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ];
        let result = rsi(&data, 14).unwrap();
        for v in result.iter().filter(|v| !v.is_nan()) {
            assert!(*v >= 0.0 && *v <= 100.0);
        }
    }

    #[test]
    fn test_rsi_errors() {
        let empty: Vec<f64> = vec![];
        assert!(matches!(rsi(&empty, 14), Err(Error::EmptyInput)));
        assert!(matches!(
            rsi(&[1.0_f64; 5], 0),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            rsi(&[1.0_f64; 5], 6),
            Err(Error::InsufficientData { indicator: "rsi", .. })
        ));
    }
}
