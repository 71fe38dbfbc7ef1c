//! CSV file data adapter.
//!
//! Expects a header row and `time,open,high,low,close,volume` columns, `time`
//! in epoch milliseconds. The volume column may be omitted.

use crate::domain::candle::Candle;
use crate::domain::error::BandchartError;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataAdapter {
    path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn format_err(&self, reason: String) -> BandchartError {
        BandchartError::DataFormat {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

impl DataPort for CsvDataAdapter {
    fn load_candles(&self) -> Result<Vec<Candle>, BandchartError> {
        let content = fs::read_to_string(&self.path).map_err(|e| BandchartError::DataLoad {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| self.format_err(format!("CSV parse error: {}", e)))?;

            let time: i64 = record
                .get(0)
                .ok_or_else(|| self.format_err("missing time column".into()))?
                .parse()
                .map_err(|e| self.format_err(format!("invalid time value: {}", e)))?;

            let open: f64 = record
                .get(1)
                .ok_or_else(|| self.format_err("missing open column".into()))?
                .parse()
                .map_err(|e| self.format_err(format!("invalid open value: {}", e)))?;

            let high: f64 = record
                .get(2)
                .ok_or_else(|| self.format_err("missing high column".into()))?
                .parse()
                .map_err(|e| self.format_err(format!("invalid high value: {}", e)))?;

            let low: f64 = record
                .get(3)
                .ok_or_else(|| self.format_err("missing low column".into()))?
                .parse()
                .map_err(|e| self.format_err(format!("invalid low value: {}", e)))?;

            let close: f64 = record
                .get(4)
                .ok_or_else(|| self.format_err("missing close column".into()))?
                .parse()
                .map_err(|e| self.format_err(format!("invalid close value: {}", e)))?;

            let volume: f64 = match record.get(5) {
                Some(v) if !v.is_empty() => v
                    .parse()
                    .map_err(|e| self.format_err(format!("invalid volume value: {}", e)))?,
                _ => 0.0,
            };

            candles.push(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }
}
