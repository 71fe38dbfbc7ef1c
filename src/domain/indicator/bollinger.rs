//! Bollinger Bands calculator.
//!
//! For every bar the output holds either `None` (no value at this position) or
//! a `BandPoint`:
//! - basis: Simple Moving Average (SMA) of the source over `length` bars
//! - upper: basis + (multiplier × StdDev)
//! - lower: basis - (multiplier × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//! `offset` shifts where a computed value lands in the output, not which window
//! produced it; writes outside the series are dropped and colliding writes
//! resolve last-writer-wins.
//!
//! Warmup: no full window ends before index (length-1), so those windows
//! produce nothing. Default parameters: length=20, multiplier=2.0, offset=0.

use crate::domain::candle::Candle;
use crate::domain::indicator::{BandPoint, BollingerConfig, MaType};

/// Pure transform: the output has the same length as `candles`, slot `i`
/// corresponds to bar `i`. Never fails; degenerate parameters (`length == 0`,
/// empty input) yield an all-absent result. Non-finite source values are not
/// filtered and propagate into the affected windows' outputs.
pub fn compute_bollinger(candles: &[Candle], config: &BollingerConfig) -> Vec<Option<BandPoint>> {
    let mut result: Vec<Option<BandPoint>> = vec![None; candles.len()];

    let length = config.length;
    if length == 0 || candles.is_empty() {
        return result;
    }

    let values: Vec<f64> = candles.iter().map(|c| config.source.of(c)).collect();

    for i in 0..values.len() {
        if i < length - 1 {
            continue;
        }

        let window = &values[i + 1 - length..=i];
        let mean: f64 = window.iter().sum::<f64>() / length as f64;

        let variance: f64 = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / length as f64;
        let sd = variance.sqrt();

        let basis = match config.ma_type {
            MaType::Sma => mean,
        };
        let upper = basis + config.stddev_multiplier * sd;
        let lower = basis - config.stddev_multiplier * sd;

        // plain slot assignment in ascending window order: a later window
        // overwrites anything already at its target (last writer wins)
        let target = (i as i64).checked_add(config.offset);
        if let Some(target) = target.filter(|t| (0..candles.len() as i64).contains(t)) {
            result[target as usize] = Some(BandPoint {
                time: candles[i].time,
                basis,
                upper,
                lower,
            });
        }
    }

    result
}
