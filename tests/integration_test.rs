//! Integration tests for the chart pipeline.
//!
//! Tests cover:
//! - Full pipeline with a mock data port (no files)
//! - JSON and CSV file adapters feeding the calculator
//! - Band semantics observed end-to-end (warmup, offset, degenerate configs)
//! - SVG and HTML rendering of computed overlays

mod common;

use common::*;

use bandchart::adapters::csv_adapter::CsvDataAdapter;
use bandchart::adapters::html_chart_adapter::render_page;
use bandchart::adapters::json_adapter::JsonDataAdapter;
use bandchart::adapters::svg_chart::{render_chart, SvgChartAdapter};
use bandchart::domain::chart::ChartConfig;
use bandchart::domain::indicator::bollinger::compute_bollinger;
use bandchart::domain::indicator::BollingerConfig;
use bandchart::domain::style::BandStyle;
use bandchart::ports::chart_port::ChartPort;
use bandchart::ports::data_port::DataPort;

fn config(length: usize, stddev_multiplier: f64, offset: i64) -> BollingerConfig {
    BollingerConfig {
        length,
        stddev_multiplier,
        offset,
        ..BollingerConfig::default()
    }
}

mod full_pipeline {
    use super::*;

    #[test]
    fn mock_port_to_band_series() {
        let port = MockDataPort::new().with_candles(make_candles(&[10.0, 10.0, 10.0, 10.0, 10.0]));

        let candles = port.load_candles().unwrap();
        let bands = compute_bollinger(&candles, &config(5, 2.0, 0));

        assert_eq!(bands.len(), 5);
        assert!(bands[..4].iter().all(Option::is_none));
        let point = bands[4].unwrap();
        assert_eq!(point.basis, 10.0);
        assert_eq!(point.upper, 10.0);
        assert_eq!(point.lower, 10.0);
    }

    #[test]
    fn mock_port_error_propagates() {
        let port = MockDataPort::new().with_error("backend unavailable");
        let err = port.load_candles().unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn json_file_to_rendered_svg() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let file = write_temp_file(&candles_as_json(&candles), ".json");

        let port = JsonDataAdapter::new(file.path().to_path_buf());
        let loaded = port.load_candles().unwrap();
        assert_eq!(loaded, candles);

        let cfg = config(3, 1.0, 0);
        let bands = compute_bollinger(&loaded, &cfg);
        let svg = render_chart(
            &loaded,
            Some(&bands),
            &cfg,
            &BandStyle::default(),
            &ChartConfig::default(),
        );

        assert!(svg.contains("Bollinger Bands (3)"));
        // window [3,4,5]: basis 4, sd = sqrt(2/3)
        assert!(svg.contains("Basis: 4.00"));
    }

    #[test]
    fn csv_file_to_rendered_html() {
        let mut rows = String::from("time,open,high,low,close,volume\n");
        for (i, close) in [10.0, 11.0, 12.0, 13.0].iter().enumerate() {
            rows.push_str(&format!(
                "{},{},{},{},{},100\n",
                1_704_067_200_000_i64 + i as i64 * 86_400_000,
                close - 0.5,
                close + 1.0,
                close - 1.0,
                close
            ));
        }
        let file = write_temp_file(&rows, ".csv");

        let port = CsvDataAdapter::new(file.path().to_path_buf());
        let candles = port.load_candles().unwrap();
        assert_eq!(candles.len(), 4);

        let cfg = config(2, 2.0, 0);
        let bands = compute_bollinger(&candles, &cfg);
        let html = render_page(
            &candles,
            Some(&bands),
            &cfg,
            &BandStyle::default(),
            &ChartConfig::default(),
        )
        .unwrap();

        assert!(html.contains("<svg"));
        assert!(html.contains("Total Candles"));
        assert!(html.contains("13.00"));
    }

    #[test]
    fn svg_adapter_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("chart.svg");
        let candles = make_candles(&[1.0, 2.0, 3.0]);
        let cfg = config(2, 2.0, 0);
        let bands = compute_bollinger(&candles, &cfg);

        SvgChartAdapter::new()
            .write(
                &candles,
                Some(&bands),
                &cfg,
                &BandStyle::default(),
                &ChartConfig::default(),
                output.to_str().unwrap(),
            )
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("<svg"));
        assert!(written.contains("band-line"));
    }
}

mod band_semantics_end_to_end {
    use super::*;

    #[test]
    fn warmup_is_observable_through_the_pipeline() {
        let port = MockDataPort::new().with_candles(make_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        let candles = port.load_candles().unwrap();
        let bands = compute_bollinger(&candles, &config(3, 1.0, 0));

        assert!(bands[0].is_none());
        assert!(bands[1].is_none());
        let point = bands[2].unwrap();
        let sd = (2.0_f64 / 3.0).sqrt();
        assert!((point.basis - 2.0).abs() < 1e-10);
        assert!((point.upper - (2.0 + sd)).abs() < 1e-10);
        assert!((point.lower - (2.0 - sd)).abs() < 1e-10);
    }

    #[test]
    fn offset_shifts_are_visible_in_the_rendered_overlay() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let shifted_cfg = config(3, 1.0, -2);
        let bands = compute_bollinger(&candles, &shifted_cfg);

        // values occupy slots 0..=2, so the polylines cover one contiguous run
        assert!(bands[0].is_some());
        assert!(bands[3].is_none());
        assert!(bands[4].is_none());

        let mut style = BandStyle::default();
        style.basis.visible = false;
        style.lower.visible = false;
        style.background.visible = false;
        let svg = render_chart(
            &candles,
            Some(&bands),
            &shifted_cfg,
            &style,
            &ChartConfig::default(),
        );
        assert_eq!(svg.matches("class=\"band-line\"").count(), 1);
    }

    #[test]
    fn degenerate_length_renders_candles_without_overlay_values() {
        let candles = make_candles(&[1.0, 2.0, 3.0]);
        let cfg = config(0, 2.0, 0);
        let bands = compute_bollinger(&candles, &cfg);
        assert!(bands.iter().all(Option::is_none));

        let svg = render_chart(
            &candles,
            Some(&bands),
            &cfg,
            &BandStyle::default(),
            &ChartConfig::default(),
        );
        // overlay lines have no points to draw, the legend reports N/A
        assert_eq!(svg.matches("class=\"band-line\"").count(), 0);
        assert!(svg.contains("Basis: N/A"));
        assert_eq!(svg.matches("class=\"candle-body\"").count(), 3);
    }

    #[test]
    fn recomputation_after_config_change_is_fresh() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let narrow = compute_bollinger(&candles, &config(3, 1.0, 0));
        let wide = compute_bollinger(&candles, &config(3, 3.0, 0));
        let narrow_again = compute_bollinger(&candles, &config(3, 1.0, 0));

        assert_eq!(narrow, narrow_again);
        assert!(wide[4].unwrap().upper > narrow[4].unwrap().upper);
    }
}
