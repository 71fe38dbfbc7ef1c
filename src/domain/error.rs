//! Domain error types.

/// Top-level error type for bandchart.
#[derive(Debug, thiserror::Error)]
pub enum BandchartError {
    #[error("data load error for {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("data format error in {path}: {reason}")]
    DataFormat { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("chart render error: {reason}")]
    ChartRender { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BandchartError> for std::process::ExitCode {
    fn from(err: &BandchartError) -> Self {
        let code: u8 = match err {
            BandchartError::Io(_) => 1,
            BandchartError::ConfigParse { .. }
            | BandchartError::ConfigMissing { .. }
            | BandchartError::ConfigInvalid { .. } => 2,
            BandchartError::DataLoad { .. } | BandchartError::DataFormat { .. } => 3,
            BandchartError::ChartRender { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
