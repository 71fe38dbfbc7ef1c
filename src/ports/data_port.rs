//! Market data access port trait.

use crate::domain::candle::Candle;
use crate::domain::error::BandchartError;

/// Source of the candle series. Implementations deliver the series fully
/// materialized and ordered by time ascending.
pub trait DataPort {
    fn load_candles(&self) -> Result<Vec<Candle>, BandchartError>;
}
