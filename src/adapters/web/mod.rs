//! Web server adapter (feature `web`).
//!
//! Serves the chart through a browser: the HTML page, the bare SVG, and the
//! candle series as JSON. Every request reloads and recomputes — the
//! calculator keeps no state between calls, so a fresh invocation per request
//! is the recomputation rule.

mod error;
mod handlers;

pub use error::WebError;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::domain::chart::ChartConfig;
use crate::domain::indicator::BollingerConfig;
use crate::domain::style::BandStyle;
use crate::ports::data_port::DataPort;

pub struct AppState {
    pub data_port: Arc<dyn DataPort + Send + Sync>,
    pub bollinger: BollingerConfig,
    pub style: BandStyle,
    pub chart: ChartConfig,
    pub show_bands: bool,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::chart_page))
        .route("/chart.svg", get(handlers::chart_svg))
        .route("/data/ohlcv.json", get(handlers::candle_data))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("Serving chart on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await
}
