//! custody-console server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints and the
//! background pollers for near-real-time widgets.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use custody_console::api;
use custody_console::app_state::AppState;
use custody_console::cache::{CachePolicies, QueryCache};
use custody_console::client::BackendClient;
use custody_console::config::ConsoleConfig;
use custody_console::domain::EventBus;
use custody_console::service::{ConsoleService, spawn_pollers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.backend_url,
        "starting custody-console"
    );

    // Build client and cache
    let client = BackendClient::from_config(&config).context("building backend client")?;
    let event_bus = EventBus::new(config.event_bus_capacity);
    let cache = Arc::new(QueryCache::new(event_bus.clone()));
    let policies = CachePolicies::new(config.default_stale_after);

    // Build service layer
    let service = Arc::new(ConsoleService::new(&client, cache, policies, event_bus));

    let shutdown = CancellationToken::new();
    let pollers = if config.polling_enabled {
        spawn_pollers(&service, &shutdown)
    } else {
        tracing::info!("polling disabled");
        Vec::new()
    };

    let app = api::build_app(AppState::new(service, &config.backend_url));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "cannot listen for shutdown signal");
            }
            tracing::info!("shutting down");
            signal.cancel();
        })
        .await
        .context("serving http")?;

    shutdown.cancel();
    for poller in pollers {
        let _ = poller.await;
    }

    Ok(())
}
