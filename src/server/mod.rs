//! HTTP surface: `POST /convert`, `GET /health` and `GET /`.

mod error;
mod handlers;
mod state;

pub use error::ServiceError;
pub use state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/convert", post(handlers::convert))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
