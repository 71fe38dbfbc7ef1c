//! Settings validation.
//!
//! Validates a user-supplied settings file before a chart run. This is input
//! hygiene at the file boundary only — the band calculator itself accepts any
//! parameters and answers degenerate ones with an all-absent series.

use crate::domain::error::BandchartError;
use crate::domain::indicator::{MaType, PriceSource};
use crate::domain::style::LineStyle;
use crate::ports::config_port::ConfigPort;

pub fn validate_settings(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    validate_data_format(config)?;
    validate_chart_geometry(config)?;
    validate_length(config)?;
    validate_ma_type(config)?;
    validate_source(config)?;
    for band in ["basis", "upper", "lower"] {
        validate_line_width(config, band)?;
        validate_line_style(config, band)?;
    }
    validate_opacity(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> BandchartError {
    BandchartError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_data_format(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    match config.get_string("data", "format") {
        None => Ok(()),
        Some(v) if matches!(v.to_lowercase().as_str(), "json" | "csv") => Ok(()),
        Some(v) => Err(invalid(
            "data",
            "format",
            format!("unknown format '{}', expected json or csv", v),
        )),
    }
}

fn validate_chart_geometry(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    let width = config.get_int("chart", "width", 1200);
    if width < 1 {
        return Err(invalid("chart", "width", "width must be positive"));
    }
    let height = config.get_int("chart", "height", 600);
    if height < 1 {
        return Err(invalid("chart", "height", "height must be positive"));
    }
    Ok(())
}

fn validate_length(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    let length = config.get_int("bollinger", "length", 20);
    if length < 1 {
        return Err(invalid("bollinger", "length", "length must be positive"));
    }
    Ok(())
}

fn validate_ma_type(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    match config.get_string("bollinger", "ma_type") {
        None => Ok(()),
        Some(v) if MaType::parse(&v).is_some() => Ok(()),
        Some(v) => Err(invalid(
            "bollinger",
            "ma_type",
            format!("unsupported ma_type '{}', only sma is implemented", v),
        )),
    }
}

fn validate_source(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    match config.get_string("bollinger", "source") {
        None => Ok(()),
        Some(v) if PriceSource::parse(&v).is_some() => Ok(()),
        Some(v) => Err(invalid(
            "bollinger",
            "source",
            format!("unsupported source '{}', only close is implemented", v),
        )),
    }
}

fn validate_line_width(config: &dyn ConfigPort, band: &str) -> Result<(), BandchartError> {
    let width = config.get_int(band, "line_width", 2);
    if !(1..=10).contains(&width) {
        return Err(invalid(
            band,
            "line_width",
            "line_width must be between 1 and 10",
        ));
    }
    Ok(())
}

fn validate_line_style(config: &dyn ConfigPort, band: &str) -> Result<(), BandchartError> {
    match config.get_string(band, "line_style") {
        None => Ok(()),
        Some(v) if LineStyle::parse(&v).is_some() => Ok(()),
        Some(v) => Err(invalid(
            band,
            "line_style",
            format!("unknown line_style '{}', expected solid or dashed", v),
        )),
    }
}

fn validate_opacity(config: &dyn ConfigPort) -> Result<(), BandchartError> {
    let opacity = config.get_int("background", "opacity", 10);
    if !(0..=100).contains(&opacity) {
        return Err(invalid(
            "background",
            "opacity",
            "opacity must be between 0 and 100",
        ));
    }
    Ok(())
}
