//! Batch analysis over several bar tables.
//!
//! Typical use is one symbol at several timeframes, or several symbols at one.
//! With the `parallel` feature, batches of at least
//! [`BatchProcessor::min_parallel_threshold`] tables run on the rayon pool;
//! smaller batches and builds without the feature run sequentially. Results
//! keep input order either way.
//!
//! ```toml
//! [dependencies]
//! ta-signals = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use ta_signals::batch::BatchProcessor;
//! use ta_signals::bars::{Bar, BarTable};
//! use ta_signals::config::AnalysisConfig;
//!
//! let table = |step: f64| {
//!     let bars = (0..40)
//!         .map(|i| {
//!             let c = 100.0 + (i as f64 * step).sin() * 3.0;
//!             Bar::new(i * 60, c, c + 1.0, c - 1.0, c, 10.0)
//!         })
//!         .collect();
//!     BarTable::<f64>::new(bars).unwrap()
//! };
//! let tables = vec![table(0.3), table(0.7)];
//!
//! let reports = BatchProcessor::new()
//!     .analyze_all(&tables, &AnalysisConfig::default())
//!     .unwrap();
//! assert_eq!(reports.len(), 2);
//! ```

use crate::analysis::{analyze, AnalysisReport};
use crate::bars::BarTable;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs one operation over many tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    /// Tables needed before the rayon pool is used.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a processor that goes parallel from four tables.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: 4,
        }
    }

    /// Sets the number of tables required to use parallel processing.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns the parallel threshold.
    #[must_use]
    pub const fn get_min_parallel_threshold(&self) -> usize {
        self.min_parallel_threshold
    }

    /// Applies `op` to every table, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error `op` produces.
    #[cfg(feature = "parallel")]
    pub fn process<T, F, R>(&self, tables: &[BarTable<T>], op: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&BarTable<T>) -> Result<R> + Send + Sync,
        R: Send,
    {
        tracing::debug!(
            tables = tables.len(),
            parallel = tables.len() >= self.min_parallel_threshold,
            "batch"
        );
        if tables.len() < self.min_parallel_threshold {
            tables.iter().map(op).collect()
        } else {
            tables.par_iter().map(op).collect::<Result<Vec<R>>>()
        }
    }

    /// Sequential version when the `parallel` feature is disabled.
    ///
    /// # Errors
    ///
    /// Returns the first error `op` produces.
    #[cfg(not(feature = "parallel"))]
    pub fn process<T, F, R>(&self, tables: &[BarTable<T>], op: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&BarTable<T>) -> Result<R>,
    {
        tracing::debug!(tables = tables.len(), parallel = false, "batch");
        tables.iter().map(op).collect()
    }

    /// Runs [`analyze`] over every table with one config.
    ///
    /// # Errors
    ///
    /// Returns the first error [`analyze`] produces.
    pub fn analyze_all<T: SeriesElement>(
        &self,
        tables: &[BarTable<T>],
        config: &AnalysisConfig,
    ) -> Result<Vec<AnalysisReport<T>>> {
        config.validate()?;
        self.process(tables, |table| analyze(table, config))
    }
}

/// Shorthand for [`BatchProcessor::analyze_all`] with default settings.
///
/// # Errors
///
/// Returns the first error [`analyze`] produces.
pub fn analyze_batch<T: SeriesElement>(
    tables: &[BarTable<T>],
    config: &AnalysisConfig,
) -> Result<Vec<AnalysisReport<T>>> {
    BatchProcessor::new().analyze_all(tables, config)
}
