//! Core traits for ta-signals numeric operations.
//!
//! The primary trait is [`SeriesElement`], which abstracts over `f32` and
//! `f64` so every series function works for both. The module also provides
//! input validation through [`ValidatedInput`] and standalone helpers that
//! reject parameter misuse before any computation starts.
//!
//! # Example
//!
//! ```
//! use ta_signals::traits::{validate_window, SeriesElement};
//!
//! fn window_mean<T: SeriesElement>(data: &[T], period: usize) -> ta_signals::Result<T> {
//!     validate_window(data, period, "window_mean")?;
//!     let sum = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / T::from_usize(period)?)
//! }
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0];
//! assert!((window_mean(&data, 3).unwrap() - 2.0).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a price series.
///
/// Extends `num_traits::Float` with conversions used throughout the crate.
/// Implemented for every type meeting the bounds, which in practice means
/// `f32` and `f64`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Converts the element to `f64`, mapping failures to NaN.
    #[inline]
    #[must_use]
    fn to_f64_lossy(self) -> f64 {
        <f64 as NumCast>::from(self).unwrap_or(f64::NAN)
    }

    /// Returns the constant 2 as this type.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100 as this type.
    ///
    /// Used for percentage scales such as RSI.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        <Self as NumCast>::from(100).unwrap_or_else(Self::nan)
    }

    /// Converts a small literal used as a geometric ratio (0.1, 0.5, 0.99 ...).
    ///
    /// Literals used by the crate are always representable; NaN is returned
    /// otherwise, which makes every comparison against it false.
    #[inline]
    #[must_use]
    fn ratio(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Trait for validating input data before computation.
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the length of the series.
    fn len(&self) -> usize;

    /// Returns true if the series is empty.
    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates that the series has at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` if the series is shorter than `min_length`.
    #[inline]
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()> {
        if self.len() < min_length {
            Err(Error::InsufficientData {
                required: min_length,
                actual: self.len(),
                indicator,
            })
        } else {
            Ok(())
        }
    }

    /// Validates that the series is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if the series is empty.
    #[inline]
    fn validate_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(())
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

/// Validates that a period is non-zero.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates a window against its input series.
///
/// Performs, in order: period is non-zero, data is not empty, data holds at
/// least `period` elements.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is zero
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the window exceeds the data length
#[inline]
pub fn validate_window<T: SeriesElement>(
    data: &[T],
    period: usize,
    indicator: &'static str,
) -> Result<()> {
    validate_period(period)?;
    data.validate_not_empty()?;
    data.validate_min_length(period, indicator)
}

/// Validates a fractional threshold: it must be finite and non-negative.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` naming `name` otherwise.
#[inline]
pub fn validate_threshold(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            reason: "must be finite and non-negative",
        })
    }
}
