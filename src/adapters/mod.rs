//! Concrete adapter implementations for ports.

pub mod json_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod svg_chart;
pub mod html_chart_adapter;
#[cfg(feature = "web")]
pub mod web;
