//! OHLCV candle representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled bar. `time` is epoch milliseconds; a series is ordered by `time`
/// ascending. Loaders sort on ingest — downstream consumers trust the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Timestamp as UTC, or `None` if `time` is outside chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// `time` formatted as a UTC date, falling back to the raw millis.
    pub fn date_label(&self) -> String {
        match self.datetime() {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.time.to_string(),
        }
    }
}
