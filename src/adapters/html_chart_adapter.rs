//! HTML page adapter implementing ChartPort.
//!
//! Wraps the SVG chart in a standalone page with a market-data summary and,
//! when the overlay is active, the Bollinger settings in effect.

use std::fs;

use crate::adapters::svg_chart::render_chart;
use crate::domain::candle::Candle;
use crate::domain::chart::ChartConfig;
use crate::domain::error::BandchartError;
use crate::domain::indicator::{BandPoint, BollingerConfig};
use crate::domain::style::BandStyle;
use crate::ports::chart_port::ChartPort;

use askama::Template;

#[derive(Template)]
#[template(path = "chart.html")]
struct ChartPageTemplate<'a> {
    title: &'a str,
    svg: &'a str,
    candle_count: usize,
    latest_close: String,
    latest_time: String,
    show_settings: bool,
    length: usize,
    multiplier: f64,
    source: String,
    offset: i64,
}

/// Full chart page as an HTML string. Shared by the file adapter and the web
/// server.
pub fn render_page(
    candles: &[Candle],
    bands: Option<&[Option<BandPoint>]>,
    config: &BollingerConfig,
    style: &BandStyle,
    chart: &ChartConfig,
) -> Result<String, BandchartError> {
    let svg = render_chart(candles, bands, config, style, chart);

    let latest = candles.last();
    let template = ChartPageTemplate {
        title: &chart.title,
        svg: &svg,
        candle_count: candles.len(),
        latest_close: latest
            .map(|c| format!("{:.2}", c.close))
            .unwrap_or_else(|| "N/A".to_string()),
        latest_time: latest
            .map(|c| c.date_label())
            .unwrap_or_else(|| "N/A".to_string()),
        show_settings: bands.is_some(),
        length: config.length,
        multiplier: config.stddev_multiplier,
        source: config.source.to_string(),
        offset: config.offset,
    };

    template.render().map_err(|e| BandchartError::ChartRender {
        reason: e.to_string(),
    })
}

pub struct HtmlChartAdapter;

impl HtmlChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPort for HtmlChartAdapter {
    fn write(
        &self,
        candles: &[Candle],
        bands: Option<&[Option<BandPoint>]>,
        config: &BollingerConfig,
        style: &BandStyle,
        chart: &ChartConfig,
        output_path: &str,
    ) -> Result<(), BandchartError> {
        let html = render_page(candles, bands, config, style, chart)?;
        fs::write(output_path, html)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::bollinger::compute_bollinger;

    fn make_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time: 1_704_067_200_000 + i as i64 * 86_400_000,
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 0.0,
            })
            .collect()
    }

    #[test]
    fn page_embeds_svg_and_market_summary() {
        let candles = make_candles(&[10.0, 11.0, 12.125]);
        let html = render_page(
            &candles,
            None,
            &BollingerConfig::default(),
            &BandStyle::default(),
            &ChartConfig::default(),
        )
        .unwrap();

        assert!(html.contains("<svg"));
        assert!(html.contains("Total Candles"));
        assert!(html.contains(">3<"));
        assert!(html.contains("12.13")); // latest close, display-rounded
        assert!(html.contains("2024-01-03"));
        assert!(!html.contains("Offset"));
    }

    #[test]
    fn page_lists_settings_when_overlay_active() {
        let mut config = BollingerConfig::default();
        config.length = 3;
        config.offset = -2;
        let candles = make_candles(&[10.0, 11.0, 12.0, 13.0]);
        let bands = compute_bollinger(&candles, &config);
        let html = render_page(
            &candles,
            Some(&bands),
            &config,
            &BandStyle::default(),
            &ChartConfig::default(),
        )
        .unwrap();

        assert!(html.contains("Offset"));
        assert!(html.contains(">-2<"));
        assert!(html.contains(">close<"));
    }

    #[test]
    fn empty_series_page_still_renders() {
        let html = render_page(
            &[],
            None,
            &BollingerConfig::default(),
            &BandStyle::default(),
            &ChartConfig::default(),
        )
        .unwrap();
        assert!(html.contains("No data available"));
        assert!(html.contains(">N/A<"));
    }
}
