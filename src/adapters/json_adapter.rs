//! JSON file data adapter.
//!
//! Reads an array of OHLCV records (`time` in epoch milliseconds, `volume`
//! optional) from a single file, the shape the viewer's static
//! `data/ohlcv.json` resource uses.

use crate::domain::candle::Candle;
use crate::domain::error::BandchartError;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;

pub struct JsonDataAdapter {
    path: PathBuf,
}

impl JsonDataAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DataPort for JsonDataAdapter {
    fn load_candles(&self) -> Result<Vec<Candle>, BandchartError> {
        let content = fs::read_to_string(&self.path).map_err(|e| BandchartError::DataLoad {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut candles: Vec<Candle> =
            serde_json::from_str(&content).map_err(|e| BandchartError::DataFormat {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_data(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn loads_candle_array() {
        let file = write_data(
            r#"[
                {"time": 1704067200000, "open": 100.0, "high": 110.0, "low": 90.0, "close": 105.0, "volume": 50000},
                {"time": 1704153600000, "open": 105.0, "high": 115.0, "low": 100.0, "close": 110.0, "volume": 60000}
            ]"#,
        );
        let adapter = JsonDataAdapter::new(file.path().to_path_buf());
        let candles = adapter.load_candles().unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1_704_067_200_000);
        assert_eq!(candles[0].close, 105.0);
        assert_eq!(candles[1].volume, 60_000.0);
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let file = write_data(
            r#"[{"time": 1704067200000, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5}]"#,
        );
        let adapter = JsonDataAdapter::new(file.path().to_path_buf());
        let candles = adapter.load_candles().unwrap();
        assert_eq!(candles[0].volume, 0.0);
    }

    #[test]
    fn sorts_by_time_ascending() {
        let file = write_data(
            r#"[
                {"time": 3000, "open": 1.0, "high": 1.0, "low": 1.0, "close": 3.0},
                {"time": 1000, "open": 1.0, "high": 1.0, "low": 1.0, "close": 1.0},
                {"time": 2000, "open": 1.0, "high": 1.0, "low": 1.0, "close": 2.0}
            ]"#,
        );
        let adapter = JsonDataAdapter::new(file.path().to_path_buf());
        let candles = adapter.load_candles().unwrap();
        let times: Vec<i64> = candles.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![1000, 2000, 3000]);
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let file = write_data(r#"{"not": "an array"}"#);
        let adapter = JsonDataAdapter::new(file.path().to_path_buf());
        let err = adapter.load_candles().unwrap_err();
        assert!(matches!(err, BandchartError::DataFormat { .. }));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let adapter = JsonDataAdapter::new(PathBuf::from("/nonexistent/ohlcv.json"));
        let err = adapter.load_candles().unwrap_err();
        assert!(matches!(err, BandchartError::DataLoad { .. }));
    }
}
