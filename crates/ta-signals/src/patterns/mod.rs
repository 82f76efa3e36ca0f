//! Candlestick pattern recognition.
//!
//! Every pattern is a stateless [`PatternDetector`]: it declares how many
//! consecutive bars it needs and inspects exactly that many [`Candle`]s
//! ending at the evaluated bar. A [`PatternRegistry`] owns a list of boxed
//! detectors and scans a [`BarTable`](crate::bars::BarTable) with all of
//! them, so adding a pattern means registering one more detector.
//!
//! # Pattern Categories
//!
//! ## Single / contextual bar
//! [`Hammer`], [`HangingMan`], [`ShootingStar`], [`DojiStar`],
//! [`LongLeggedDoji`], [`DragonflyDoji`], [`GravestoneDoji`], [`SpinningTop`]
//!
//! ## Two-bar
//! [`Engulfing`], [`BullishHarami`], [`BearishHarami`], [`HaramiCross`],
//! [`DarkCloudCover`], [`Piercing`]
//!
//! ## Three-bar
//! [`MorningStar`], [`EveningStar`], [`ThreeWhiteSoldiers`], [`ThreeBlackCrows`]
//!
//! ## Five-bar
//! [`RisingThreeMethods`], [`FallingThreeMethods`]
//!
//! # Example
//!
//! ```
//! use ta_signals::bars::{Bar, BarTable};
//! use ta_signals::patterns::{PatternLabel, PatternRegistry};
//!
//! let table = BarTable::new(vec![
//!     Bar::new(1, 10.0_f64, 10.5, 7.5, 8.0, 1.0),
//!     Bar::new(2, 7.0, 11.5, 6.5, 11.0, 1.0),
//! ])
//! .unwrap();
//!
//! let events = PatternRegistry::standard().scan(&table);
//! assert!(events
//!     .iter()
//!     .any(|e| e.index == 1 && e.label == PatternLabel::BullishEngulfing));
//! ```

pub mod core;
pub mod five_candle;
pub mod registry;
pub mod single;
pub mod three_candle;
pub mod two_candle;

use std::fmt;

use crate::traits::SeriesElement;

pub use self::core::{candles, Candle};
pub use five_candle::{FallingThreeMethods, RisingThreeMethods};
pub use registry::{detect_pattern, PatternRegistry};
pub use single::{
    DojiStar, DragonflyDoji, GravestoneDoji, Hammer, HangingMan, LongLeggedDoji, ShootingStar,
    SpinningTop,
};
pub use three_candle::{EveningStar, MorningStar, ThreeBlackCrows, ThreeWhiteSoldiers};
pub use two_candle::{BearishHarami, BullishHarami, DarkCloudCover, Engulfing, HaramiCross, Piercing};

/// The fixed set of labels a detector can emit.
///
/// `Display` renders the label text consumers show next to a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternLabel {
    /// Bullish engulfing, rendered `Bullish`.
    BullishEngulfing,
    /// Bearish engulfing, rendered `Bearish`.
    BearishEngulfing,
    /// `Bullish Harami`
    BullishHarami,
    /// `Bearish Harami`
    BearishHarami,
    /// `Bullish Harami Cross`
    BullishHaramiCross,
    /// `Bearish Harami Cross`
    BearishHaramiCross,
    /// `Hammer`
    Hammer,
    /// `Hanging Man`
    HangingMan,
    /// `Shooting Star`
    ShootingStar,
    /// `Doji Star`
    DojiStar,
    /// `Long-Legged Doji`
    LongLeggedDoji,
    /// `Dragonfly Doji`
    DragonflyDoji,
    /// `Gravestone Doji`
    GravestoneDoji,
    /// `Spinning Top`
    SpinningTop,
    /// `Piercing`
    Piercing,
    /// `Dark Cloud Cover`
    DarkCloudCover,
    /// `Morning Star`
    MorningStar,
    /// `Evening Star`
    EveningStar,
    /// `Three White Soldiers`
    ThreeWhiteSoldiers,
    /// `Three Black Crows`
    ThreeBlackCrows,
    /// `Rising Three Methods`
    RisingThreeMethods,
    /// `Falling Three Methods`
    FallingThreeMethods,
}

impl PatternLabel {
    /// Display text of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BullishEngulfing => "Bullish",
            Self::BearishEngulfing => "Bearish",
            Self::BullishHarami => "Bullish Harami",
            Self::BearishHarami => "Bearish Harami",
            Self::BullishHaramiCross => "Bullish Harami Cross",
            Self::BearishHaramiCross => "Bearish Harami Cross",
            Self::Hammer => "Hammer",
            Self::HangingMan => "Hanging Man",
            Self::ShootingStar => "Shooting Star",
            Self::DojiStar => "Doji Star",
            Self::LongLeggedDoji => "Long-Legged Doji",
            Self::DragonflyDoji => "Dragonfly Doji",
            Self::GravestoneDoji => "Gravestone Doji",
            Self::SpinningTop => "Spinning Top",
            Self::Piercing => "Piercing",
            Self::DarkCloudCover => "Dark Cloud Cover",
            Self::MorningStar => "Morning Star",
            Self::EveningStar => "Evening Star",
            Self::ThreeWhiteSoldiers => "Three White Soldiers",
            Self::ThreeBlackCrows => "Three Black Crows",
            Self::RisingThreeMethods => "Rising Three Methods",
            Self::FallingThreeMethods => "Falling Three Methods",
        }
    }
}

impl fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern found at one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternEvent {
    /// Position of the bar that completes the pattern.
    pub index: usize,
    /// Timestamp of that bar.
    pub timestamp: i64,
    /// What was found.
    pub label: PatternLabel,
}

/// A named, stateless candlestick predicate.
///
/// `detect` receives exactly `window()` consecutive candles, oldest first,
/// ending at the bar being evaluated.
pub trait PatternDetector<T: SeriesElement>: Send + Sync {
    /// Human-readable detector name.
    fn name(&self) -> &'static str;

    /// Number of consecutive candles the predicate reads.
    fn window(&self) -> usize;

    /// Returns the label if the pattern completes at the last candle.
    fn detect(&self, candles: &[Candle<T>]) -> Option<PatternLabel>;
}
