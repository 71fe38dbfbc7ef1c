//! HTTP error responses for the web adapter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::error::BandchartError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<BandchartError> for WebError {
    fn from(err: BandchartError) -> Self {
        let status = match &err {
            BandchartError::ConfigParse { .. }
            | BandchartError::ConfigMissing { .. }
            | BandchartError::ConfigInvalid { .. } => StatusCode::BAD_REQUEST,
            BandchartError::DataLoad { .. } | BandchartError::DataFormat { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            BandchartError::ChartRender { .. } | BandchartError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
