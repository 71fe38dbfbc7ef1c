//! Bollinger Bands indicator types.
//!
//! - `BollingerConfig`: parameter set for one computation
//! - `MaType` / `PriceSource`: closed enums with a single implemented variant;
//!   adding a variant forces every `match` on them to be revisited
//! - `BandPoint`: one computed output slot (absent slots are `None` in the
//!   result vector)

pub mod bollinger;

use crate::domain::candle::Candle;
use std::fmt;

/// Moving-average flavor for the basis line. Only the simple moving average is
/// implemented; the enum exists so future variants fail to compile rather than
/// silently degrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaType {
    #[default]
    Sma,
}

impl MaType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "sma" => Some(MaType::Sma),
            _ => None,
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaType::Sma => write!(f, "SMA"),
        }
    }
}

/// Price field the bands are computed from. Close only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSource {
    #[default]
    Close,
}

impl PriceSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "close" => Some(PriceSource::Close),
            _ => None,
        }
    }

    pub fn of(&self, candle: &Candle) -> f64 {
        match self {
            PriceSource::Close => candle.close,
        }
    }
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSource::Close => write!(f, "close"),
        }
    }
}

/// Parameters for one band computation.
///
/// `length == 0` and empty input are defined "no data yet" states, not errors.
/// `stddev_multiplier` is applied as-is (zero and negative included); `offset`
/// may be any integer and shifts where a computed value is written, not which
/// window produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerConfig {
    pub length: usize,
    pub ma_type: MaType,
    pub source: PriceSource,
    pub stddev_multiplier: f64,
    pub offset: i64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            length: 20,
            ma_type: MaType::Sma,
            source: PriceSource::Close,
            stddev_multiplier: 2.0,
            offset: 0,
        }
    }
}

impl fmt::Display for BollingerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BOLLINGER({},{},{},{})",
            self.length, self.stddev_multiplier, self.source, self.offset
        )
    }
}

/// One computed output slot: window mean plus the band edges at
/// `basis ± multiplier·σ`. `time` is the timestamp of the bar whose window
/// produced the value, which differs from the slot's bar when `offset != 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub time: i64,
    pub basis: f64,
    pub upper: f64,
    pub lower: f64,
}
