//! Chart surface configuration.

/// Pixel geometry and title for a rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            title: "Bollinger Bands Chart".to_string(),
        }
    }
}
