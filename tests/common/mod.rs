#![allow(dead_code)]

use bandchart::domain::candle::Candle;
use bandchart::domain::error::BandchartError;
use bandchart::ports::data_port::DataPort;
use std::io::Write;

pub struct MockDataPort {
    pub candles: Vec<Candle>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            candles: Vec::new(),
            error: None,
        }
    }

    pub fn with_candles(mut self, candles: Vec<Candle>) -> Self {
        self.candles = candles;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_candles(&self) -> Result<Vec<Candle>, BandchartError> {
        if let Some(reason) = &self.error {
            return Err(BandchartError::DataLoad {
                path: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.candles.clone())
    }
}

/// Candles with the given closes, one per day starting 2024-01-01 UTC.
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: 1_704_067_200_000 + i as i64 * 86_400_000,
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10_000.0,
        })
        .collect()
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn candles_as_json(candles: &[Candle]) -> String {
    serde_json::to_string(candles).unwrap()
}

pub const VALID_INI: &str = r#"
[data]
path = data/ohlcv.json
format = json

[chart]
width = 1200
height = 600
title = Test Chart

[bollinger]
length = 3
ma_type = sma
source = close
stddev_multiplier = 2.0
offset = 0

[basis]
visible = true
color = #f59e0b
line_width = 2
line_style = solid

[upper]
visible = true
color = #3b82f6
line_width = 2
line_style = dashed

[lower]
visible = true
color = #10b981
line_width = 2
line_style = solid

[background]
visible = true
opacity = 10
"#;
