//! Per-connection subscription manager.
//!
//! Tracks which resources a WebSocket client follows and filters cache
//! events server-side.

use std::collections::BTreeSet;

use crate::domain::Resource;

/// Resource subscriptions of a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Explicit subscriptions. Ignored while `subscribe_all` is set.
    resources: BTreeSet<Resource>,
    /// Wildcard `"*"` subscription.
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds resources. `wildcard` enables the all-resources subscription.
    pub fn subscribe(&mut self, resources: &[Resource], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.resources.extend(resources.iter().copied());
    }

    /// Removes resources. `wildcard` drops every subscription.
    pub fn unsubscribe(&mut self, resources: &[Resource], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
            self.resources.clear();
            return;
        }
        for resource in resources {
            self.resources.remove(resource);
        }
    }

    /// Returns `true` if events for `resource` should be forwarded.
    #[must_use]
    pub fn matches(&self, resource: Resource) -> bool {
        self.subscribe_all || self.resources.contains(&resource)
    }

    /// Explicit subscriptions in declaration order.
    #[must_use]
    pub fn resources(&self) -> Vec<Resource> {
        self.resources.iter().copied().collect()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub const fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(Resource::Users));
    }

    #[test]
    fn explicit_subscription_filters() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[Resource::Withdrawals, Resource::Networks], false);
        assert!(mgr.matches(Resource::Withdrawals));
        assert!(!mgr.matches(Resource::Users));
        assert_eq!(mgr.resources(), [Resource::Withdrawals, Resource::Networks]);
    }

    #[test]
    fn wildcard_matches_everything_until_cleared() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(Resource::ALL.iter().all(|r| mgr.matches(*r)));
        mgr.unsubscribe(&[], true);
        assert!(!mgr.matches(Resource::Dashboard));
        assert!(!mgr.is_subscribed_all());
    }

    #[test]
    fn unsubscribe_removes_resource() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[Resource::Sar], false);
        mgr.unsubscribe(&[Resource::Sar], false);
        assert!(!mgr.matches(Resource::Sar));
    }
}
