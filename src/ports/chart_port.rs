//! Chart output port trait.

use crate::domain::candle::Candle;
use crate::domain::chart::ChartConfig;
use crate::domain::error::BandchartError;
use crate::domain::indicator::{BandPoint, BollingerConfig};
use crate::domain::style::BandStyle;

/// Port for writing a rendered chart. `bands` is aligned to `candles` by index;
/// `None` means the overlay is disabled entirely.
pub trait ChartPort {
    fn write(
        &self,
        candles: &[Candle],
        bands: Option<&[Option<BandPoint>]>,
        config: &BollingerConfig,
        style: &BandStyle,
        chart: &ChartConfig,
        output_path: &str,
    ) -> Result<(), BandchartError>;
}
