use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::config::ServerConfig;
use crate::render::RenderAdapter;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<dyn RenderAdapter>,

    /// Bounds how many renders run at once on the blocking pool.
    pub render_permits: Arc<Semaphore>,

    pub render_timeout: Duration,

    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(renderer: Arc<dyn RenderAdapter>, server: &ServerConfig) -> Self {
        Self {
            renderer,
            render_permits: Arc::new(Semaphore::new(server.max_concurrent_renders.max(1))),
            render_timeout: server.render_timeout(),
            max_body_bytes: server.max_body_bytes,
        }
    }
}
