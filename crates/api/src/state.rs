use std::sync::Arc;

use crate::config::ServerConfig;
use crate::responder::Respond;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rendering strategy every handler result goes through.
    pub responder: Arc<dyn Respond>,
}

impl AppState {
    pub fn new(config: ServerConfig, responder: Arc<dyn Respond>) -> Self {
        Self {
            config: Arc::new(config),
            responder,
        }
    }
}
