//! HTTP request handlers for the web adapter.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::adapters::html_chart_adapter::render_page;
use crate::adapters::svg_chart::render_chart;
use crate::domain::candle::Candle;
use crate::domain::indicator::bollinger::compute_bollinger;
use crate::domain::indicator::BandPoint;

use super::{AppState, WebError};

fn load_and_compute(
    state: &AppState,
) -> Result<(Vec<Candle>, Option<Vec<Option<BandPoint>>>), WebError> {
    let candles = state.data_port.load_candles()?;
    let bands = state
        .show_bands
        .then(|| compute_bollinger(&candles, &state.bollinger));
    Ok((candles, bands))
}

pub async fn chart_page(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let (candles, bands) = load_and_compute(&state)?;
    let html = render_page(
        &candles,
        bands.as_deref(),
        &state.bollinger,
        &state.style,
        &state.chart,
    )?;
    Ok(Html(html).into_response())
}

pub async fn chart_svg(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let (candles, bands) = load_and_compute(&state)?;
    let svg = render_chart(
        &candles,
        bands.as_deref(),
        &state.bollinger,
        &state.style,
        &state.chart,
    );
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub async fn candle_data(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    let candles = state.data_port.load_candles().map_err(WebError::from)?;
    Ok(Json(candles).into_response())
}

pub async fn not_found() -> WebError {
    WebError::not_found("no such page")
}
