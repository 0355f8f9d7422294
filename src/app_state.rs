//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::ConsoleService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Console service for cached reads and mutations.
    pub service: Arc<ConsoleService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Backend base URL, reported by `/health`.
    pub backend_url: Arc<str>,
}

impl AppState {
    /// Builds the state around a service, sharing the service's event bus.
    #[must_use]
    pub fn new(service: Arc<ConsoleService>, backend_url: &str) -> Self {
        Self {
            event_bus: service.event_bus().clone(),
            service,
            backend_url: Arc::from(backend_url),
        }
    }
}
