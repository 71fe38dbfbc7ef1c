//! SVG chart rendering.
//!
//! Produces a self-contained SVG document: candlesticks, grid, optional band
//! overlay (three polylines plus a shaded region between upper and lower),
//! price axis and a legend with the latest band values. Absent band slots
//! break the overlay lines into separate segments rather than being bridged.

use crate::domain::candle::Candle;
use crate::domain::chart::ChartConfig;
use crate::domain::error::BandchartError;
use crate::domain::indicator::{BandPoint, BollingerConfig};
use crate::domain::style::{BandStyle, LineSettings};
use crate::ports::chart_port::ChartPort;
use std::fs;

const BG_COLOR: &str = "#111827";
const GRID_COLOR: &str = "#1f2937";
const UP_COLOR: &str = "#22c55e";
const DOWN_COLOR: &str = "#ef4444";
const FLAT_COLOR: &str = "#6b7280";
const TEXT_COLOR: &str = "#9ca3af";

const PAD_LEFT: f64 = 10.0;
const PAD_RIGHT: f64 = 70.0;
const PAD_TOP: f64 = 40.0;
const PAD_BOTTOM: f64 = 40.0;

pub fn render_chart(
    candles: &[Candle],
    bands: Option<&[Option<BandPoint>]>,
    config: &BollingerConfig,
    style: &BandStyle,
    chart: &ChartConfig,
) -> String {
    let width = chart.width as f64;
    let height = chart.height as f64;

    if candles.is_empty() {
        return format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" fill="{bg}"/>
<text x="{cx}" y="{cy}" fill="{text}" font-family="sans-serif" font-size="14" text-anchor="middle">No data available</text>
</svg>
"#,
            w = width,
            h = height,
            cx = width / 2.0,
            cy = height / 2.0,
            bg = BG_COLOR,
            text = TEXT_COLOR,
        );
    }

    let plot_width = width - PAD_LEFT - PAD_RIGHT;
    let plot_height = height - PAD_TOP - PAD_BOTTOM;

    let (min_price, max_price) = price_range(candles, bands);
    let range = max_price - min_price;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let slot = plot_width / candles.len() as f64;

    let y_of = |price: f64| PAD_TOP + (max_price - price) * scale_y;
    let x_of = |index: usize| PAD_LEFT + (index as f64 + 0.5) * slot;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
<rect width="{w}" height="{h}" fill="{bg}"/>
"#,
        w = width,
        h = height,
        bg = BG_COLOR,
    ));

    svg.push_str(&grid_lines(candles, plot_width, plot_height));
    svg.push_str(&axis_labels(candles, min_price, max_price, &y_of, &x_of, width, height));

    if let Some(bands) = bands {
        if style.background.visible {
            svg.push_str(&fill_regions(bands, style, &x_of, &y_of));
        }
    }

    svg.push_str(&candlesticks(candles, slot, &x_of, &y_of));

    if let Some(bands) = bands {
        svg.push_str(&band_polyline(bands, |p| p.upper, &style.upper, &x_of, &y_of));
        svg.push_str(&band_polyline(bands, |p| p.basis, &style.basis, &x_of, &y_of));
        svg.push_str(&band_polyline(bands, |p| p.lower, &style.lower, &x_of, &y_of));
        svg.push_str(&legend(bands, config, style));
    }

    svg.push_str(&format!(
        r##"<text x="{x}" y="24" fill="#e5e7eb" font-family="sans-serif" font-size="16">{title}</text>
"##,
        x = PAD_LEFT,
        title = xml_escape(&chart.title),
    ));

    svg.push_str("</svg>\n");
    svg
}

/// Price span covering candle wicks and every finite band value.
fn price_range(candles: &[Candle], bands: Option<&[Option<BandPoint>]>) -> (f64, f64) {
    let mut min = candles
        .iter()
        .map(|c| c.low)
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);
    let mut max = candles
        .iter()
        .map(|c| c.high)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if let Some(bands) = bands {
        for point in bands.iter().flatten() {
            for v in [point.upper, point.lower, point.basis] {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

fn grid_lines(candles: &[Candle], plot_width: f64, plot_height: f64) -> String {
    let mut out = String::new();
    for step in 0..=4 {
        let y = PAD_TOP + plot_height * step as f64 / 4.0;
        out.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{c}" stroke-width="1"/>
"#,
            x1 = PAD_LEFT,
            x2 = PAD_LEFT + plot_width,
            y = y,
            c = GRID_COLOR,
        ));
    }
    let vertical_every = (candles.len() / 8).max(1);
    for index in (0..candles.len()).step_by(vertical_every) {
        let x = PAD_LEFT + (index as f64 + 0.5) * plot_width / candles.len() as f64;
        out.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{c}" stroke-width="1"/>
"#,
            x = x,
            y1 = PAD_TOP,
            y2 = PAD_TOP + plot_height,
            c = GRID_COLOR,
        ));
    }
    out
}

fn axis_labels(
    candles: &[Candle],
    min_price: f64,
    max_price: f64,
    y_of: &dyn Fn(f64) -> f64,
    x_of: &dyn Fn(usize) -> f64,
    width: f64,
    height: f64,
) -> String {
    let mut out = String::new();
    for step in 0..=4 {
        let price = min_price + (max_price - min_price) * (4 - step) as f64 / 4.0;
        out.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" fill="{c}" font-family="sans-serif" font-size="11">{price:.2}</text>
"#,
            x = width - PAD_RIGHT + 8.0,
            y = y_of(price) + 4.0,
            c = TEXT_COLOR,
            price = price,
        ));
    }
    let label_every = (candles.len() / 6).max(1);
    for index in (0..candles.len()).step_by(label_every) {
        out.push_str(&format!(
            r#"<text x="{x:.1}" y="{y:.1}" fill="{c}" font-family="sans-serif" font-size="11" text-anchor="middle">{label}</text>
"#,
            x = x_of(index),
            y = height - PAD_BOTTOM + 18.0,
            c = TEXT_COLOR,
            label = candles[index].date_label(),
        ));
    }
    out
}

fn candlesticks(
    candles: &[Candle],
    slot: f64,
    x_of: &dyn Fn(usize) -> f64,
    y_of: &dyn Fn(f64) -> f64,
) -> String {
    let body_width = (slot * 0.6).max(1.0);
    let mut out = String::new();

    for (i, candle) in candles.iter().enumerate() {
        if ![candle.open, candle.high, candle.low, candle.close]
            .iter()
            .all(|v| v.is_finite())
        {
            continue;
        }

        let color = if candle.close > candle.open {
            UP_COLOR
        } else if candle.close < candle.open {
            DOWN_COLOR
        } else {
            FLAT_COLOR
        };

        let x = x_of(i);
        out.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{c}" stroke-width="1"/>
"#,
            x = x,
            y1 = y_of(candle.high),
            y2 = y_of(candle.low),
            c = color,
        ));

        let top = y_of(candle.open.max(candle.close));
        let bottom = y_of(candle.open.min(candle.close));
        out.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{c}" class="candle-body"/>
"#,
            x = x - body_width / 2.0,
            y = top,
            w = body_width,
            h = (bottom - top).max(1.0),
            c = color,
        ));
    }
    out
}

/// Contiguous runs of plottable points; a `None` slot or a non-finite value
/// ends the current run.
fn runs(
    bands: &[Option<BandPoint>],
    value: impl Fn(&BandPoint) -> f64,
) -> Vec<Vec<(usize, f64)>> {
    let mut segments: Vec<Vec<(usize, f64)>> = Vec::new();
    let mut current: Vec<(usize, f64)> = Vec::new();

    for (i, slot) in bands.iter().enumerate() {
        match slot {
            Some(point) if value(point).is_finite() => current.push((i, value(point))),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn band_polyline(
    bands: &[Option<BandPoint>],
    value: impl Fn(&BandPoint) -> f64,
    line: &LineSettings,
    x_of: &dyn Fn(usize) -> f64,
    y_of: &dyn Fn(f64) -> f64,
) -> String {
    if !line.visible {
        return String::new();
    }

    let dash = match line.line_style.dash_array() {
        "" => String::new(),
        pattern => format!(r#" stroke-dasharray="{}""#, pattern),
    };

    let mut out = String::new();
    for segment in runs(bands, &value) {
        let points: Vec<String> = segment
            .iter()
            .map(|&(i, v)| format!("{:.1},{:.1}", x_of(i), y_of(v)))
            .collect();
        out.push_str(&format!(
            r#"<polyline points="{pts}" fill="none" stroke="{c}" stroke-width="{w}"{dash} class="band-line"/>
"#,
            pts = points.join(" "),
            c = line.color,
            w = line.line_width,
            dash = dash,
        ));
    }
    out
}

fn fill_regions(
    bands: &[Option<BandPoint>],
    style: &BandStyle,
    x_of: &dyn Fn(usize) -> f64,
    y_of: &dyn Fn(f64) -> f64,
) -> String {
    let opacity = style.background.opacity as f64 / 100.0;
    let mut out = String::new();

    // a region needs both edges; a slot missing either one ends the run
    let region_runs = runs(bands, |p| {
        if p.lower.is_finite() { p.upper } else { f64::NAN }
    });
    for segment in region_runs {
        if segment.len() < 2 {
            continue;
        }

        let mut points: Vec<String> = segment
            .iter()
            .map(|&(i, upper)| format!("{:.1},{:.1}", x_of(i), y_of(upper)))
            .collect();
        points.extend(segment.iter().rev().map(|&(i, _)| {
            let p = bands[i].unwrap();
            format!("{:.1},{:.1}", x_of(i), y_of(p.lower))
        }));

        out.push_str(&format!(
            r#"<polygon points="{pts}" fill="{c}" fill-opacity="{o:.2}" class="band-fill"/>
"#,
            pts = points.join(" "),
            c = style.upper.color,
            o = opacity,
        ));
    }
    out
}

fn legend(bands: &[Option<BandPoint>], config: &BollingerConfig, style: &BandStyle) -> String {
    // latest slot, like the chart's info box: absent shows N/A
    let latest = bands.last().copied().flatten();
    let fmt = |v: Option<f64>| match v {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    };

    let mut lines: Vec<(String, &str)> = Vec::new();
    if style.upper.visible {
        lines.push((
            format!("Upper: {}", fmt(latest.map(|p| p.upper))),
            style.upper.color.as_str(),
        ));
    }
    if style.basis.visible {
        lines.push((
            format!("Basis: {}", fmt(latest.map(|p| p.basis))),
            style.basis.color.as_str(),
        ));
    }
    if style.lower.visible {
        lines.push((
            format!("Lower: {}", fmt(latest.map(|p| p.lower))),
            style.lower.color.as_str(),
        ));
    }

    let mut out = format!(
        r##"<text x="{x}" y="{y}" fill="#e5e7eb" font-family="sans-serif" font-size="12">Bollinger Bands ({len})</text>
"##,
        x = PAD_LEFT + 8.0,
        y = PAD_TOP + 16.0,
        len = config.length,
    );
    for (row, (label, color)) in lines.iter().enumerate() {
        out.push_str(&format!(
            r#"<text x="{x}" y="{y}" fill="{c}" font-family="sans-serif" font-size="12">{label}</text>
"#,
            x = PAD_LEFT + 8.0,
            y = PAD_TOP + 34.0 + row as f64 * 16.0,
            c = color,
            label = label,
        ));
    }
    out
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Writes the rendered SVG document to a file.
pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPort for SvgChartAdapter {
    fn write(
        &self,
        candles: &[Candle],
        bands: Option<&[Option<BandPoint>]>,
        config: &BollingerConfig,
        style: &BandStyle,
        chart: &ChartConfig,
        output_path: &str,
    ) -> Result<(), BandchartError> {
        let svg = render_chart(candles, bands, config, style, chart);
        fs::write(output_path, svg)?;
        Ok(())
    }
}
