use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::time::{Instant, timeout_at};

use super::error::{Result, ServiceError};
use super::state::AppState;

const SERVICE_NAME: &str = "PDF Converter";

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub css: Option<String>,
    /// Accepted for compatibility; currently has no effect.
    #[serde(default)]
    pub pdf_options: Option<Value>,
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /convert": "Convert markdown to a PDF newsletter",
            "GET /health": "Health check",
            "GET /": "Service information",
        },
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Convert markdown to PDF and return it as a `newsletter.pdf` attachment.
pub async fn convert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|rejection| ServiceError::InvalidBody(rejection.body_text()))?;

    let markdown = req.markdown.unwrap_or_default();
    if req.pdf_options.is_some() {
        tracing::debug!("Ignoring pdf_options");
    }

    let doc = crate::parse(&markdown)?;
    tracing::info!(
        "Convert request: {} bytes of markdown, {} blocks",
        markdown.len(),
        doc.len()
    );

    // One deadline covers both waiting for a render slot and the render itself
    let deadline = Instant::now() + state.render_timeout;

    // Held by the render task, so a timed-out render still counts until it ends
    let permit = match timeout_at(deadline, state.render_permits.clone().acquire_owned()).await {
        Ok(Ok(permit)) => permit,
        Ok(Err(e)) => return Err(ServiceError::Unexpected(e.to_string())),
        Err(_) => return Err(ServiceError::Timeout(state.render_timeout)),
    };

    let renderer = state.renderer.clone();
    let stylesheet = req.css;
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        renderer.render(&doc, stylesheet.as_deref())
    });

    let pdf_bytes = match timeout_at(deadline, task).await {
        Ok(Ok(rendered)) => rendered?,
        Ok(Err(e)) => return Err(ServiceError::Unexpected(format!("Render task failed: {}", e))),
        Err(_) => return Err(ServiceError::Timeout(state.render_timeout)),
    };

    tracing::info!("Conversion completed ({} bytes)", pdf_bytes.len());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"newsletter.pdf\"",
            ),
        ],
        pdf_bytes,
    ))
}
