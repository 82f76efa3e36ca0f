//! Strong support and resistance levels.
//!
//! The pipeline is:
//!
//! 1. local extrema of the close series ([`crate::kernels::local_extrema`])
//! 2. [`count_touches`]: for each distinct extremum price, the number of
//!    closes within ±1% of it
//! 3. keep levels with at least `touch_threshold` touches
//! 4. [`merge_levels`]: sort ascending and fold close neighbours together
//!
//! Merging is sequential: each level is compared with the running `current`
//! value only, and a merge moves `current` to the midpoint of the two. A
//! level already emitted is never revisited, so three levels that are each
//! within the threshold of the next can come out as two.
//!
//! # Example
//!
//! ```
//! use ta_signals::levels::strong_support_resistance;
//!
//! let close = vec![
//!     100.0_f64, 102.0, 100.0, 102.0, 100.0, 102.0, 100.0, 107.0, 105.0, 107.0, 105.0, 107.0,
//! ];
//! let levels = strong_support_resistance(&close, 1, 3, 0.01).unwrap();
//!
//! assert_eq!(levels.support, vec![100.0]);
//! assert_eq!(levels.resistance, vec![102.0, 107.0]);
//! ```

use std::cmp::Ordering;

use crate::error::{Error, LevelSide, Result};
use crate::kernels::local_extrema::find_local_extrema;
use crate::traits::{validate_threshold, SeriesElement};

/// Lower edge of the touch band, as a fraction of the level.
pub const TOUCH_BAND_LOWER: f64 = 0.99;
/// Upper edge of the touch band, as a fraction of the level.
pub const TOUCH_BAND_UPPER: f64 = 1.01;

/// A price level and the number of closes that touched it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceLevel<T> {
    /// Level price.
    pub price: T,
    /// Closes inside `[price * 0.99, price * 1.01]`.
    pub touches: usize,
}

/// Merged strong levels, each side ascending.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrongLevels<T> {
    /// Levels derived from local minima.
    pub support: Vec<T>,
    /// Levels derived from local maxima.
    pub resistance: Vec<T>,
}

#[inline]
fn ascending<T: SeriesElement>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn touches_of<T: SeriesElement>(level: T, prices: &[T], lower: T, upper: T) -> usize {
    let lo = level * lower;
    let hi = level * upper;
    prices.iter().filter(|&&p| p >= lo && p <= hi).count()
}

/// Counts, for each distinct candidate level, the closes inside its touch band.
///
/// Levels are reported in first-occurrence order; exact duplicates collapse
/// into one entry. NaN candidates are skipped.
#[must_use]
pub fn count_touches<T: SeriesElement>(levels: &[T], prices: &[T]) -> Vec<PriceLevel<T>> {
    let lower = T::ratio(TOUCH_BAND_LOWER);
    let upper = T::ratio(TOUCH_BAND_UPPER);

    let mut counted: Vec<PriceLevel<T>> = Vec::with_capacity(levels.len());
    for &level in levels {
        if level.is_nan() || counted.iter().any(|c| c.price == level) {
            continue;
        }
        counted.push(PriceLevel {
            price: level,
            touches: touches_of(level, prices, lower, upper),
        });
    }
    counted
}

/// Sorts `levels` ascending and merges neighbours within `merge_threshold`.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `merge_threshold` is negative or not finite
/// - `Error::NoQualifyingLevels` if `levels` is empty
pub fn merge_levels<T: SeriesElement>(
    levels: &[T],
    merge_threshold: f64,
    side: LevelSide,
) -> Result<Vec<T>> {
    validate_threshold("merge_threshold", merge_threshold)?;
    let threshold = T::from_f64(merge_threshold)?;

    let mut sorted: Vec<T> = levels.to_vec();
    sorted.sort_by(ascending);

    let Some((&first, rest)) = sorted.split_first() else {
        return Err(Error::NoQualifyingLevels { side });
    };

    let mut merged = Vec::new();
    let mut current = first;
    for &level in rest {
        if (level - current).abs() / current <= threshold {
            current = (current + level) / T::two();
        } else {
            merged.push(current);
            current = level;
        }
    }
    merged.push(current);
    Ok(merged)
}

fn strong_side<T: SeriesElement>(
    candidates: &[T],
    close: &[T],
    touch_threshold: usize,
    merge_threshold: f64,
    side: LevelSide,
) -> Result<Vec<T>> {
    let touched = count_touches(candidates, close);
    let kept: Vec<T> = touched
        .iter()
        .filter(|l| l.touches >= touch_threshold)
        .map(|l| l.price)
        .collect();
    let merged = merge_levels(&kept, merge_threshold, side)?;

    tracing::debug!(
        %side,
        candidates = touched.len(),
        kept = kept.len(),
        merged = merged.len(),
        "strong levels"
    );
    Ok(merged)
}

/// Detects strong support and resistance levels on a close series.
///
/// # Errors
///
/// - errors from [`find_local_extrema`] for a bad `order` or short series
/// - `Error::InvalidParameter` if `merge_threshold` is negative or not finite
/// - `Error::NoQualifyingLevels` naming the first side with nothing left to merge
pub fn strong_support_resistance<T: SeriesElement>(
    close: &[T],
    order: usize,
    touch_threshold: usize,
    merge_threshold: f64,
) -> Result<StrongLevels<T>> {
    validate_threshold("merge_threshold", merge_threshold)?;
    let extrema = find_local_extrema(close, order)?;

    let support = strong_side(
        &extremum_prices(close, &extrema.minima),
        close,
        touch_threshold,
        merge_threshold,
        LevelSide::Support,
    )?;
    let resistance = strong_side(
        &extremum_prices(close, &extrema.maxima),
        close,
        touch_threshold,
        merge_threshold,
        LevelSide::Resistance,
    )?;

    Ok(StrongLevels {
        support,
        resistance,
    })
}

/// Strong levels for one side only.
///
/// Lets a caller keep one side when the other has no qualifying level.
///
/// # Errors
///
/// Same as [`strong_support_resistance`], restricted to `side`.
pub fn strong_levels_on_side<T: SeriesElement>(
    close: &[T],
    order: usize,
    touch_threshold: usize,
    merge_threshold: f64,
    side: LevelSide,
) -> Result<Vec<T>> {
    validate_threshold("merge_threshold", merge_threshold)?;
    let extrema = find_local_extrema(close, order)?;
    let indices = match side {
        LevelSide::Support => &extrema.minima,
        LevelSide::Resistance => &extrema.maxima,
    };
    strong_side(
        &extremum_prices(close, indices),
        close,
        touch_threshold,
        merge_threshold,
        side,
    )
}

fn extremum_prices<T: SeriesElement>(close: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| close[i]).collect()
}

/// Ranks levels by touch count and keeps the top `n`.
///
/// Ties keep ascending price order.
#[must_use]
pub fn strongest_levels<T: SeriesElement>(
    levels: &[T],
    prices: &[T],
    n: usize,
) -> Vec<PriceLevel<T>> {
    let mut sorted = levels.to_vec();
    sorted.sort_by(ascending);

    let mut ranked = count_touches(&sorted, prices);
    ranked.sort_by(|a, b| b.touches.cmp(&a.touches));
    ranked.truncate(n);
    ranked
}

/// Strong level detection configuration with fluent builder API.
///
/// ```
/// use ta_signals::levels::StrongLevelsConfig;
///
/// let close = vec![10.0_f64, 12.0, 10.0, 12.0, 10.0, 12.0];
/// let levels = StrongLevelsConfig::new()
///     .order(1)
///     .touch_threshold(2)
///     .compute(&close)
///     .unwrap();
/// assert_eq!(levels.support, vec![10.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrongLevelsConfig {
    order: usize,
    touch_threshold: usize,
    merge_threshold: f64,
}

impl Default for StrongLevelsConfig {
    /// Order 5, three touches, 1% merge distance.
    fn default() -> Self {
        Self {
            order: 5,
            touch_threshold: 3,
            merge_threshold: 0.01,
        }
    }
}

impl StrongLevelsConfig {
    /// Creates a configuration with the default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the extremum neighbourhood half-width.
    ///
    /// Default: 5
    #[must_use]
    pub const fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Sets the minimum touch count a level needs.
    ///
    /// Default: 3
    #[must_use]
    pub const fn touch_threshold(mut self, touches: usize) -> Self {
        self.touch_threshold = touches;
        self
    }

    /// Sets the relative distance under which neighbouring levels merge.
    ///
    /// Default: 0.01
    #[must_use]
    pub const fn merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Runs [`strong_support_resistance`] with the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`strong_support_resistance`].
    pub fn compute<T: SeriesElement>(&self, close: &[T]) -> Result<StrongLevels<T>> {
        strong_support_resistance(close, self.order, self.touch_threshold, self.merge_threshold)
    }

    /// Returns the extremum order.
    #[must_use]
    pub const fn get_order(&self) -> usize {
        self.order
    }

    /// Returns the touch threshold.
    #[must_use]
    pub const fn get_touch_threshold(&self) -> usize {
        self.touch_threshold
    }

    /// Returns the merge threshold.
    #[must_use]
    pub const fn get_merge_threshold(&self) -> f64 {
        self.merge_threshold
    }
}
