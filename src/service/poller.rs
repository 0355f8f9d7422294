//! Fixed-interval refetch of polled widgets.
//!
//! One task per polled resource refreshes the overview window on its
//! interval and publishes [`crate::domain::CacheEvent::Refreshed`] through
//! the cache. Failures are logged and the next tick tries again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::ConsoleService;
use crate::domain::Resource;

/// Spawns one poller per resource with a refetch interval.
///
/// Every task stops when `shutdown` is cancelled.
pub fn spawn_pollers(service: &Arc<ConsoleService>, shutdown: &CancellationToken) -> Vec<JoinHandle<()>> {
    service
        .policies()
        .polled()
        .into_iter()
        .map(|(resource, every)| {
            tokio::spawn(poll(
                Arc::clone(service),
                resource,
                every,
                shutdown.clone(),
            ))
        })
        .collect()
}

async fn poll(
    service: Arc<ConsoleService>,
    resource: Resource,
    every: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!(%resource, interval_secs = every.as_secs(), "poller started");

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = service.refresh(resource).await {
                    warn!(%resource, error = %e, "poll failed");
                }
            }
        }
    }
    debug!(%resource, "poller stopped");
}
