//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_chart_adapter::HtmlChartAdapter;
use crate::adapters::json_adapter::JsonDataAdapter;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::candle::Candle;
use crate::domain::chart::ChartConfig;
use crate::domain::config_validation::validate_settings;
use crate::domain::error::BandchartError;
use crate::domain::indicator::bollinger::compute_bollinger;
use crate::domain::indicator::{BollingerConfig, MaType, PriceSource};
use crate::domain::style::{BackgroundFill, BandStyle, LineSettings, LineStyle};
use crate::ports::chart_port::ChartPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "bandchart", about = "Candlestick chart renderer with Bollinger Bands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartFormat {
    Svg,
    Html,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the chart to a file
    Render {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        format: Option<ChartFormat>,
        /// Render candles only, without the band overlay
        #[arg(long)]
        no_bands: bool,
    },
    /// Print the computed band series as CSV on stdout
    Compute {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Show a summary of the candle data
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Validate a settings file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Serve the chart over HTTP
    Serve {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Render {
            config,
            data,
            output,
            format,
            no_bands,
        } => run_render(&config, data.as_deref(), output.as_deref(), format, no_bands),
        Command::Compute { config, data } => run_compute(config.as_deref(), data.as_deref()),
        Command::Info { config, data } => run_info(config.as_deref(), data.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::Serve { config, addr } => run_serve(&config, &addr),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BandchartError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_config_or_defaults(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(p) => {
            let adapter = load_config(p)?;
            if let Err(e) = validate_settings(&adapter) {
                eprintln!("error: {e}");
                return Err((&e).into());
            }
            Ok(adapter)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_bollinger_config(adapter: &dyn ConfigPort) -> BollingerConfig {
    let defaults = BollingerConfig::default();
    BollingerConfig {
        length: adapter
            .get_int("bollinger", "length", defaults.length as i64)
            .max(0) as usize,
        ma_type: adapter
            .get_string("bollinger", "ma_type")
            .and_then(|v| MaType::parse(&v))
            .unwrap_or(defaults.ma_type),
        source: adapter
            .get_string("bollinger", "source")
            .and_then(|v| PriceSource::parse(&v))
            .unwrap_or(defaults.source),
        stddev_multiplier: adapter.get_double(
            "bollinger",
            "stddev_multiplier",
            defaults.stddev_multiplier,
        ),
        offset: adapter.get_int("bollinger", "offset", defaults.offset),
    }
}

fn build_line_settings(adapter: &dyn ConfigPort, band: &str, defaults: &LineSettings) -> LineSettings {
    LineSettings {
        visible: adapter.get_bool(band, "visible", defaults.visible),
        color: adapter
            .get_string(band, "color")
            .unwrap_or_else(|| defaults.color.clone()),
        line_width: adapter
            .get_int(band, "line_width", defaults.line_width as i64)
            .clamp(1, 10) as u32,
        line_style: adapter
            .get_string(band, "line_style")
            .and_then(|v| LineStyle::parse(&v))
            .unwrap_or(defaults.line_style),
    }
}

pub fn build_band_style(adapter: &dyn ConfigPort) -> BandStyle {
    let defaults = BandStyle::default();
    BandStyle {
        basis: build_line_settings(adapter, "basis", &defaults.basis),
        upper: build_line_settings(adapter, "upper", &defaults.upper),
        lower: build_line_settings(adapter, "lower", &defaults.lower),
        background: BackgroundFill {
            visible: adapter.get_bool("background", "visible", defaults.background.visible),
            opacity: adapter
                .get_int("background", "opacity", defaults.background.opacity as i64)
                .clamp(0, 100) as u32,
        },
    }
}

pub fn build_chart_config(adapter: &dyn ConfigPort) -> ChartConfig {
    let defaults = ChartConfig::default();
    ChartConfig {
        width: adapter
            .get_int("chart", "width", defaults.width as i64)
            .max(1) as u32,
        height: adapter
            .get_int("chart", "height", defaults.height as i64)
            .max(1) as u32,
        title: adapter
            .get_string("chart", "title")
            .unwrap_or(defaults.title),
    }
}

/// Data file from the `--data` override or the `[data]` section; the format
/// comes from `[data] format` when present, otherwise the file extension.
pub fn resolve_data_port(
    adapter: &dyn ConfigPort,
    data_override: Option<&Path>,
) -> Result<Box<dyn DataPort + Send + Sync>, BandchartError> {
    let path = match data_override {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(adapter.get_string("data", "path").ok_or_else(|| {
            BandchartError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            }
        })?),
    };

    let format = adapter
        .get_string("data", "format")
        .map(|v| v.to_lowercase());
    let is_csv = match format.as_deref() {
        Some("csv") => true,
        Some(_) => false,
        None => path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")),
    };

    if is_csv {
        Ok(Box::new(CsvDataAdapter::new(path)))
    } else {
        Ok(Box::new(JsonDataAdapter::new(path)))
    }
}

fn load_candles(
    adapter: &dyn ConfigPort,
    data_override: Option<&Path>,
) -> Result<Vec<Candle>, ExitCode> {
    let port = match resolve_data_port(adapter, data_override) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };
    match port.load_candles() {
        Ok(candles) => Ok(candles),
        Err(e) => {
            eprintln!("error: {e}");
            Err((&e).into())
        }
    }
}

fn run_render(
    config_path: &Path,
    data_override: Option<&Path>,
    output_override: Option<&Path>,
    format_override: Option<ChartFormat>,
    no_bands: bool,
) -> ExitCode {
    eprintln!("Loading settings from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_settings(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let bollinger = build_bollinger_config(&adapter);
    let style = build_band_style(&adapter);
    let chart = build_chart_config(&adapter);

    let candles = match load_candles(&adapter, data_override) {
        Ok(c) => c,
        Err(code) => return code,
    };
    eprintln!("Loaded {} candles", candles.len());

    let enabled = adapter.get_bool("bollinger", "enabled", true);
    let bands = if no_bands || !enabled {
        None
    } else {
        eprintln!("Computing {}", bollinger);
        Some(compute_bollinger(&candles, &bollinger))
    };

    let output = match output_override {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(
            adapter
                .get_string("chart", "output")
                .unwrap_or_else(|| "chart.svg".to_string()),
        ),
    };

    let format = format_override.unwrap_or_else(|| {
        let is_html = output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html {
            ChartFormat::Html
        } else {
            ChartFormat::Svg
        }
    });

    let port: Box<dyn ChartPort> = match format {
        ChartFormat::Svg => Box::new(SvgChartAdapter::new()),
        ChartFormat::Html => Box::new(HtmlChartAdapter::new()),
    };

    let output_str = output.display().to_string();
    match port.write(
        &candles,
        bands.as_deref(),
        &bollinger,
        &style,
        &chart,
        &output_str,
    ) {
        Ok(()) => {
            eprintln!("Chart written to: {}", output_str);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_compute(config_path: Option<&Path>, data_override: Option<&Path>) -> ExitCode {
    let adapter = match load_config_or_defaults(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let bollinger = build_bollinger_config(&adapter);
    let candles = match load_candles(&adapter, data_override) {
        Ok(c) => c,
        Err(code) => return code,
    };

    eprintln!("Computing {} over {} candles", bollinger, candles.len());
    let bands = compute_bollinger(&candles, &bollinger);

    // one row per output slot, aligned to the input series; absent slots keep
    // the value columns empty
    println!("time,basis,upper,lower");
    let mut populated = 0usize;
    for (candle, slot) in candles.iter().zip(&bands) {
        match slot {
            Some(point) => {
                populated += 1;
                println!(
                    "{},{},{},{}",
                    candle.time, point.basis, point.upper, point.lower
                );
            }
            None => println!("{},,,", candle.time),
        }
    }
    eprintln!("{} of {} slots have band values", populated, bands.len());
    ExitCode::SUCCESS
}

fn run_info(config_path: Option<&Path>, data_override: Option<&Path>) -> ExitCode {
    let adapter = match load_config_or_defaults(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let candles = match load_candles(&adapter, data_override) {
        Ok(c) => c,
        Err(code) => return code,
    };

    println!("Total candles: {}", candles.len());
    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        println!("Time range:    {} to {}", first.date_label(), last.date_label());
        println!("Latest close:  {:.2}", last.close);
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating settings: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_settings(&adapter) {
        Ok(()) => {
            let bollinger = build_bollinger_config(&adapter);
            eprintln!("Settings validated successfully");
            eprintln!("  indicator: {}", bollinger);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[cfg(feature = "web")]
fn run_serve(config_path: &Path, addr: &str) -> ExitCode {
    use crate::adapters::web::{serve, AppState};
    use std::sync::Arc;

    eprintln!("Loading settings from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_settings(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_port = match resolve_data_port(&adapter, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let state = AppState {
        data_port: Arc::from(data_port),
        bollinger: build_bollinger_config(&adapter),
        style: build_band_style(&adapter),
        chart: build_chart_config(&adapter),
        show_bands: adapter.get_bool("bollinger", "enabled", true),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(serve(state, addr)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(not(feature = "web"))]
fn run_serve(_config_path: &Path, _addr: &str) -> ExitCode {
    eprintln!("error: web feature is required for serve");
    ExitCode::from(1)
}
