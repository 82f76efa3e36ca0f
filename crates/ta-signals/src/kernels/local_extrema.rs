//! Local extrema over a centered, edge-clipped neighbourhood.
//!
//! Index `i` is a local minimum when `data[i] <= data[j]` for every `j` in
//! `i - order ..= i + order` that lies inside the series; a local maximum
//! symmetrically with `>=`. Ties qualify, so a flat stretch marks every bar
//! in it, and the neighbourhood is clipped at both ends, so the first and
//! last bars can qualify too.
//!
//! A NaN anywhere in the neighbourhood disqualifies the centre (comparisons
//! against NaN are false).
//!
//! # Algorithm
//!
//! A monotonic deque of indices tracks the minimum (or maximum) of the
//! sliding centered window, so the scan is O(n) regardless of `order`. The
//! centre qualifies when its own value equals the window extremum.
//!
//! # Example
//!
//! ```
//! use ta_signals::kernels::local_extrema::find_local_extrema;
//!
//! let close = vec![5.0_f64, 3.0, 4.0, 6.0, 2.0, 7.0];
//! let extrema = find_local_extrema(&close, 1).unwrap();
//!
//! assert_eq!(extrema.minima, vec![1, 4]);
//! assert_eq!(extrema.maxima, vec![0, 3, 5]);
//! ```

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::traits::{SeriesElement, ValidatedInput};

/// Indices of local minima and maxima, both ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalExtrema {
    /// Indices of local minima.
    pub minima: Vec<usize>,
    /// Indices of local maxima.
    pub maxima: Vec<usize>,
}

/// Aligned support/resistance series: the close at each extremum, NaN elsewhere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportResistanceSeries<T> {
    /// Close at local minima, NaN elsewhere.
    pub support: Vec<T>,
    /// Close at local maxima, NaN elsewhere.
    pub resistance: Vec<T>,
}

impl<T: SeriesElement> SupportResistanceSeries<T> {
    /// Returns the length of the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.support.len()
    }

    /// Returns true if the series are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Defined support values in index order.
    #[must_use]
    pub fn support_levels(&self) -> Vec<T> {
        defined(&self.support)
    }

    /// Defined resistance values in index order.
    #[must_use]
    pub fn resistance_levels(&self) -> Vec<T> {
        defined(&self.resistance)
    }
}

fn defined<T: SeriesElement>(series: &[T]) -> Vec<T> {
    series.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Minimum input length accepted for a given order.
#[inline]
#[must_use]
pub const fn local_extrema_min_len(order: usize) -> usize {
    order + 1
}

fn validate_order<T: SeriesElement>(data: &[T], order: usize) -> Result<()> {
    if order == 0 {
        return Err(Error::InvalidPeriod {
            period: order,
            reason: "order must be at least 1",
        });
    }
    data.validate_not_empty()?;
    data.validate_min_length(local_extrema_min_len(order), "local_extrema")
}

/// Which extremum a [`CenteredWindow`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Min,
    Max,
}

impl Side {
    /// True when `incoming` dominates `held`, so `held` can never be the extremum again.
    #[inline]
    fn dominates<T: SeriesElement>(self, incoming: T, held: T) -> bool {
        match self {
            Self::Min => incoming <= held,
            Self::Max => incoming >= held,
        }
    }
}

/// Sliding `[i - order, i + order]` window over a series, clipped at the edges.
struct CenteredWindow<'a, T> {
    data: &'a [T],
    side: Side,
    deque: VecDeque<usize>,
    nan_count: usize,
    next: usize,
}

impl<'a, T: SeriesElement> CenteredWindow<'a, T> {
    fn new(data: &'a [T], side: Side, order: usize) -> Self {
        Self {
            data,
            side,
            deque: VecDeque::with_capacity(2 * order + 1),
            nan_count: 0,
            next: 0,
        }
    }

    fn push(&mut self, index: usize) {
        let value = self.data[index];
        if value.is_nan() {
            self.nan_count += 1;
            return;
        }
        while let Some(&back) = self.deque.back() {
            if self.side.dominates(value, self.data[back]) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back(index);
    }

    /// Moves the window to be centered on `center` and reports whether the
    /// centre value is the window extremum.
    fn qualifies(&mut self, center: usize, order: usize) -> bool {
        let right = (center + order).min(self.data.len() - 1);
        while self.next <= right {
            self.push(self.next);
            self.next += 1;
        }
        if let Some(left) = center.checked_sub(order + 1) {
            if self.data[left].is_nan() {
                self.nan_count -= 1;
            }
            while self.deque.front().is_some_and(|&front| front <= left) {
                self.deque.pop_front();
            }
        }

        if self.nan_count > 0 {
            return false;
        }
        self.deque
            .front()
            .is_some_and(|&front| self.data[front] == self.data[center])
    }
}

/// Finds local minima and maxima of `data` within `order` positions.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if `order` is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data holds `order` elements or fewer
#[must_use = "this returns a Result with the extrema indices, which should be used"]
pub fn find_local_extrema<T: SeriesElement>(data: &[T], order: usize) -> Result<LocalExtrema> {
    validate_order(data, order)?;

    let mut min_window = CenteredWindow::new(data, Side::Min, order);
    let mut max_window = CenteredWindow::new(data, Side::Max, order);
    let mut extrema = LocalExtrema::default();

    for center in 0..data.len() {
        if min_window.qualifies(center, order) {
            extrema.minima.push(center);
        }
        if max_window.qualifies(center, order) {
            extrema.maxima.push(center);
        }
    }

    tracing::debug!(
        order,
        minima = extrema.minima.len(),
        maxima = extrema.maxima.len(),
        "local extrema found"
    );
    Ok(extrema)
}

/// Builds the aligned support/resistance series for `close`.
///
/// The input is left untouched; two fresh series are returned.
///
/// # Errors
///
/// Same as [`find_local_extrema`].
pub fn support_resistance<T: SeriesElement>(
    close: &[T],
    order: usize,
) -> Result<SupportResistanceSeries<T>> {
    let extrema = find_local_extrema(close, order)?;

    let mut support = vec![T::nan(); close.len()];
    let mut resistance = vec![T::nan(); close.len()];
    for &i in &extrema.minima {
        support[i] = close[i];
    }
    for &i in &extrema.maxima {
        resistance[i] = close[i];
    }

    Ok(SupportResistanceSeries {
        support,
        resistance,
    })
}

/// O(n·order) reference scan, used to cross-check the deque kernel.
#[must_use]
pub fn find_local_extrema_naive<T: SeriesElement>(data: &[T], order: usize) -> LocalExtrema {
    let mut extrema = LocalExtrema::default();
    let len = data.len();
    for i in 0..len {
        let lo = i.saturating_sub(order);
        let hi = (i + order).min(len.saturating_sub(1));
        let window = &data[lo..=hi];
        if window.iter().all(|&v| data[i] <= v) {
            extrema.minima.push(i);
        }
        if window.iter().all(|&v| data[i] >= v) {
            extrema.maxima.push(i);
        }
    }
    extrema
}
