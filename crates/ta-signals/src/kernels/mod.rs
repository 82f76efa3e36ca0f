//! Scan kernels shared by the level detector.
//!
//! - [`local_extrema`]: centered, edge-clipped local minima/maxima in O(n)
//!   using a monotonic deque

pub mod local_extrema;

pub use local_extrema::{
    find_local_extrema, find_local_extrema_naive, local_extrema_min_len, support_resistance,
    LocalExtrema, SupportResistanceSeries,
};
