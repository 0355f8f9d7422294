//! Domain events reflecting cache state changes.
//!
//! The query cache emits a [`CacheEvent`] through the [`super::EventBus`]
//! whenever a polled widget refreshes or a mutation invalidates a resource.
//! Events are broadcast to WebSocket subscribers so the console knows when
//! to re-read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Resource;

/// Event emitted after the cache contents change.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum CacheEvent {
    /// A cache entry was refetched by a fixed-interval poller.
    Refreshed {
        /// Resource the entry belongs to.
        resource: Resource,
        /// Rendered cache key.
        key: String,
        /// Refresh timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Every entry of a resource was marked stale by a mutation.
    Invalidated {
        /// Resource that was invalidated.
        resource: Resource,
        /// Number of cache entries affected.
        entries: usize,
        /// Invalidation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl CacheEvent {
    /// Returns the resource associated with this event.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            Self::Refreshed { resource, .. } | Self::Invalidated { resource, .. } => *resource,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Refreshed { .. } => "refreshed",
            Self::Invalidated { .. } => "invalidated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refreshed_serializes_with_tag() {
        let event = CacheEvent::Refreshed {
            resource: Resource::Networks,
            key: "networks".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"refreshed\""));
        assert!(json.contains("\"resource\":\"networks\""));
    }

    #[test]
    fn resource_accessor() {
        let event = CacheEvent::Invalidated {
            resource: Resource::Withdrawals,
            entries: 3,
            timestamp: Utc::now(),
        };
        assert_eq!(event.resource(), Resource::Withdrawals);
        assert_eq!(event.event_type_str(), "invalidated");
    }
}
