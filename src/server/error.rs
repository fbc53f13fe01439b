use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::{ConvertError, RenderError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("No markdown provided")]
    EmptyMarkdown,

    #[error("PDF rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("PDF rendering timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl From<ConvertError> for ServiceError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::EmptyInput => Self::EmptyMarkdown,
            ConvertError::Render(e) => Self::Render(e),
        }
    }
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::EmptyMarkdown => StatusCode::BAD_REQUEST,
            Self::Render(_) | Self::Timeout(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, details) = match &self {
            Self::InvalidBody(reason) => ("Invalid request body", Some(reason.clone())),
            Self::EmptyMarkdown => ("No markdown provided", None),
            Self::Render(e) => ("PDF rendering failed", Some(e.to_string())),
            Self::Timeout(_) => ("PDF rendering timed out", Some(self.to_string())),
            Self::Unexpected(reason) => ("Unexpected failure", Some(reason.clone())),
        };

        if status.is_server_error() {
            tracing::error!("Conversion failed: {}", self);
        }

        let body = match details {
            Some(details) => json!({ "error": error, "details": details }),
            None => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
