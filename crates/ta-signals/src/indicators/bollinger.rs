//! Bollinger Bands indicator.
//!
//! - **Middle Band**: simple moving average of the price
//! - **Upper Band**: middle + k × standard deviation
//! - **Lower Band**: middle − k × standard deviation
//!
//! # Algorithm
//!
//! O(n) rolling Welford accumulator: each step removes the bar leaving the
//! window and adds the bar entering it, updating the mean and the sum of
//! squared deviations. The window is recomputed from scratch every `period`
//! bars, which keeps large price levels with small variance accurate.
//!
//! The standard deviation is the **sample** deviation (÷ n−1), so bands are
//! slightly wider than the population-deviation variant used by some
//! charting packages. A period of 1 is rejected because the sample deviation
//! of a single observation is undefined.
//!
//! # Formula
//!
//! ```text
//! Middle   = SMA(price, n)
//! Variance = Σ(x − Middle)² / (n − 1)
//! Upper    = Middle + k × sqrt(Variance)
//! Lower    = Middle − k × sqrt(Variance)
//! ```
//!
//! # Example
//!
//! ```
//! use ta_signals::indicators::bollinger;
//!
//! let data = vec![20.0_f64, 21.0, 22.0, 21.5, 22.5, 23.0, 22.0, 21.0];
//! let result = bollinger(&data, 5, 2.0).unwrap();
//!
//! assert!(result.middle[3].is_nan());
//! assert!(result.upper[4] > result.middle[4]);
//! assert!(result.middle[4] > result.lower[4]);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_threshold, validate_window, SeriesElement};

/// Number of leading NaN values in every band.
#[inline]
#[must_use]
pub const fn bollinger_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Minimum input length that produces at least one band value.
#[inline]
#[must_use]
pub const fn bollinger_min_len(period: usize) -> usize {
    period
}

/// Output structure containing all three Bollinger Bands.
///
/// Each vector has the same length as the input data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BollingerOutput<T> {
    /// The middle band (simple moving average).
    pub middle: Vec<T>,
    /// The upper band (middle + k × stddev).
    pub upper: Vec<T>,
    /// The lower band (middle − k × stddev).
    pub lower: Vec<T>,
}

impl<T: SeriesElement> BollingerOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

fn validate_sample_window<T: SeriesElement>(data: &[T], period: usize) -> Result<()> {
    validate_window(data, period, "bollinger")?;
    if period < 2 {
        return Err(Error::InvalidPeriod {
            period,
            reason: "sample standard deviation needs at least 2 observations",
        });
    }
    Ok(())
}

/// Rolling window accumulator for mean and sample variance (Welford).
struct RollingMoments<T> {
    count: usize,
    mean: T,
    m2: T,
    nan_count: usize,
}

impl<T: SeriesElement> RollingMoments<T> {
    fn new() -> Self {
        Self {
            count: 0,
            mean: T::zero(),
            m2: T::zero(),
            nan_count: 0,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn add(&mut self, value: T) -> Result<()> {
        if value.is_nan() {
            self.nan_count += 1;
            return Ok(());
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean = self.mean + delta / T::from_usize(self.count)?;
        self.m2 = self.m2 + delta * (value - self.mean);
        Ok(())
    }

    fn remove(&mut self, value: T) -> Result<()> {
        if value.is_nan() {
            self.nan_count -= 1;
            return Ok(());
        }
        if self.count <= 1 {
            let nan_count = self.nan_count;
            self.reset();
            self.nan_count = nan_count;
            return Ok(());
        }
        self.count -= 1;
        let delta = value - self.mean;
        self.mean = self.mean - delta / T::from_usize(self.count)?;
        self.m2 = self.m2 - delta * (value - self.mean);
        Ok(())
    }

    /// Recomputes the accumulator from the window alone.
    fn rebuild(&mut self, window: &[T]) -> Result<()> {
        self.reset();
        window.iter().try_for_each(|&value| self.add(value))
    }

    /// (mean, sample stddev), or `None` while the window holds a NaN.
    fn moments(&self) -> Result<Option<(T, T)>> {
        if self.nan_count > 0 || self.count < 2 {
            return Ok(None);
        }
        let variance = (self.m2 / T::from_usize(self.count - 1)?).max(T::zero());
        Ok(Some((self.mean, variance.sqrt())))
    }
}

/// Slides a `period` window over `data`, rebuilding it every `period` bars
/// so add/remove rounding never outlives one window.
fn rolling_moments<T: SeriesElement>(
    data: &[T],
    period: usize,
    mut emit: impl FnMut(usize, T, T),
) -> Result<()> {
    let mut window = RollingMoments::new();

    for i in 0..data.len() {
        if i >= period && (i + 1) % period == 0 {
            window.rebuild(&data[i + 1 - period..=i])?;
        } else {
            if i >= period {
                window.remove(data[i - period])?;
            }
            window.add(data[i])?;
        }
        if i + 1 >= period {
            if let Some((mean, stddev)) = window.moments()? {
                emit(i, mean, stddev);
            }
        }
    }
    Ok(())
}

/// Computes the rolling sample standard deviation.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is below 2
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the period
#[must_use = "this returns a Result with the deviation values, which should be used"]
pub fn rolling_stddev<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    validate_sample_window(data, period)?;
    let mut out = vec![T::nan(); data.len()];
    rolling_moments(data, period, |i, _, stddev| out[i] = stddev)?;
    Ok(out)
}

/// Computes Bollinger Bands for a data series.
///
/// # Errors
///
/// - `Error::InvalidPeriod` if the period is below 2
/// - `Error::InvalidParameter` if `num_std_dev` is negative or not finite
/// - `Error::EmptyInput` if the data is empty
/// - `Error::InsufficientData` if the data is shorter than the period
#[must_use = "this returns a Result with Bollinger Bands values, which should be used"]
pub fn bollinger<T: SeriesElement>(
    data: &[T],
    period: usize,
    num_std_dev: T,
) -> Result<BollingerOutput<T>> {
    validate_threshold("num_std_dev", num_std_dev.to_f64_lossy())?;
    validate_sample_window(data, period)?;

    let mut middle = vec![T::nan(); data.len()];
    let mut upper = vec![T::nan(); data.len()];
    let mut lower = vec![T::nan(); data.len()];

    rolling_moments(data, period, |i, mean, stddev| {
        middle[i] = mean;
        upper[i] = mean + num_std_dev * stddev;
        lower[i] = mean - num_std_dev * stddev;
    })?;

    Ok(BollingerOutput {
        middle,
        upper,
        lower,
    })
}

/// Bollinger Bands configuration with fluent builder API.
///
/// ```
/// use ta_signals::indicators::Bollinger;
///
/// let prices: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.4).cos()).collect();
/// let bands = Bollinger::new().period(10).std_dev(1.5).compute(&prices).unwrap();
/// assert_eq!(bands.len(), 40);
/// assert!(bands.middle[8].is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bollinger {
    period: usize,
    std_dev: f64,
}

impl Default for Bollinger {
    /// Standard parameters (20, 2.0).
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl Bollinger {
    /// Creates a configuration with standard parameters (20, 2.0).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window.
    ///
    /// Default: 20
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the standard deviation multiplier.
    ///
    /// Default: 2.0
    #[must_use]
    pub const fn std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = std_dev;
        self
    }

    /// Computes the bands with the configured parameters.
    ///
    /// # Errors
    ///
    /// See [`bollinger`].
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<BollingerOutput<T>> {
        validate_threshold("num_std_dev", self.std_dev)?;
        let std_dev = T::from_f64(self.std_dev)?;
        bollinger(data, self.period, std_dev)
    }

    /// Returns the window.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the standard deviation multiplier.
    #[must_use]
    pub const fn get_std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Number of leading NaN values in every band.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        bollinger_lookback(self.period)
    }
}
