//! Band overlay presentation state.
//!
//! Pure display attributes for the three band lines and the shaded region
//! between upper and lower. Nothing here feeds back into the calculation.

use std::fmt;

/// Stroke pattern for a band line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "solid" => Some(LineStyle::Solid),
            "dashed" => Some(LineStyle::Dashed),
            _ => None,
        }
    }

    /// SVG `stroke-dasharray` value, empty for solid strokes.
    pub fn dash_array(&self) -> &'static str {
        match self {
            LineStyle::Solid => "",
            LineStyle::Dashed => "6 4",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Solid => write!(f, "solid"),
            LineStyle::Dashed => write!(f, "dashed"),
        }
    }
}

/// Display attributes for one band line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSettings {
    pub visible: bool,
    pub color: String,
    pub line_width: u32,
    pub line_style: LineStyle,
}

impl LineSettings {
    fn new(color: &str) -> Self {
        Self {
            visible: true,
            color: color.to_string(),
            line_width: 2,
            line_style: LineStyle::Solid,
        }
    }
}

/// Shaded region between the upper and lower bands. `opacity` is 0-100.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundFill {
    pub visible: bool,
    pub opacity: u32,
}

/// Full overlay style: basis/upper/lower lines plus the background fill.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStyle {
    pub basis: LineSettings,
    pub upper: LineSettings,
    pub lower: LineSettings,
    pub background: BackgroundFill,
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            basis: LineSettings::new("#f59e0b"),
            upper: LineSettings::new("#3b82f6"),
            lower: LineSettings::new("#10b981"),
            background: BackgroundFill {
                visible: true,
                opacity: 10,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_matches_chart_defaults() {
        let style = BandStyle::default();
        assert!(style.basis.visible);
        assert_eq!(style.basis.color, "#f59e0b");
        assert_eq!(style.upper.color, "#3b82f6");
        assert_eq!(style.lower.color, "#10b981");
        assert_eq!(style.basis.line_width, 2);
        assert_eq!(style.basis.line_style, LineStyle::Solid);
        assert!(style.background.visible);
        assert_eq!(style.background.opacity, 10);
    }

    #[test]
    fn line_style_parse() {
        assert_eq!(LineStyle::parse("solid"), Some(LineStyle::Solid));
        assert_eq!(LineStyle::parse("Dashed"), Some(LineStyle::Dashed));
        assert_eq!(LineStyle::parse("dotted"), None);
    }

    #[test]
    fn dash_array_for_styles() {
        assert_eq!(LineStyle::Solid.dash_array(), "");
        assert_eq!(LineStyle::Dashed.dash_array(), "6 4");
    }
}
