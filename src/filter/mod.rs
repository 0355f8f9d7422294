//! Client-side filtering of a fetched page.
//!
//! Filters run on the page the backend returned, never across pages. A
//! [`FilterSet`] holds one optional free-text query and any number of
//! enumerated-field predicates; an item is kept when every active predicate
//! matches. Filtering is pure: the same input always yields the same
//! subsequence in the same order.

mod searchable;

pub use searchable::Searchable;

/// Active predicates for one list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Free-text query matched against the entity's searchable fields.
    pub query: Option<String>,
    /// Enumerated-field predicates as `(field, value)` pairs.
    pub enums: Vec<(&'static str, String)>,
}

impl FilterSet {
    /// Creates an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Adds an enumerated-field predicate.
    #[must_use]
    pub fn with_enum(mut self, field: &'static str, value: impl Into<String>) -> Self {
        self.enums.push((field, value.into()));
        self
    }

    /// Returns `true` when no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_query().is_none() && self.active_enums().next().is_none()
    }

    /// Returns `true` if `item` satisfies every active predicate.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        if let Some(query) = self.active_query() {
            let needle = query.to_lowercase();
            let hit = item
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        self.active_enums().all(|(field, value)| {
            item.enum_field(field)
                .is_some_and(|actual| actual.eq_ignore_ascii_case(value))
        })
    }

    fn active_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    fn active_enums(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.enums
            .iter()
            .map(|(field, value)| (*field, value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }
}

/// Returns the items matching every active predicate, in input order.
pub fn apply_filters<T>(items: &[T], filters: &FilterSet) -> Vec<T>
where
    T: Searchable + Clone,
{
    if filters.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| filters.matches(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditLog, User, UserStatus};

    fn user(id: &str, email: &str, org: Option<&str>, status: UserStatus) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            organization: org.map(str::to_string),
            role: "operator".to_string(),
            status,
            ..User::default()
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("u-1", "alice@acme.io", Some("Acme"), UserStatus::Active),
            user("u-2", "bob@globex.com", None, UserStatus::Suspended),
            user("u-3", "carol@acme.io", Some("Acme Labs"), UserStatus::Suspended),
        ]
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let all = users();
        let filtered = apply_filters(&all, &FilterSet::new());
        assert_eq!(ids(&filtered), ids(&all));
    }

    #[test]
    fn blank_values_are_inactive() {
        let filters = FilterSet::new().search("   ").with_enum("status", "");
        assert!(filters.is_empty());
        assert_eq!(apply_filters(&users(), &filters).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filtered = apply_filters(&users(), &FilterSet::new().search("ACME"));
        assert_eq!(ids(&filtered), ["u-1", "u-3"]);
    }

    #[test]
    fn search_reaches_optional_fields() {
        let filtered = apply_filters(&users(), &FilterSet::new().search("labs"));
        assert_eq!(ids(&filtered), ["u-3"]);
    }

    #[test]
    fn enum_filter_is_case_insensitive_equality() {
        let filtered = apply_filters(&users(), &FilterSet::new().with_enum("status", "Suspended"));
        assert_eq!(ids(&filtered), ["u-2", "u-3"]);

        let none = apply_filters(&users(), &FilterSet::new().with_enum("status", "suspend"));
        assert!(none.is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let filters = FilterSet::new().search("acme").with_enum("status", "suspended");
        assert_eq!(ids(&apply_filters(&users(), &filters)), ["u-3"]);
    }

    #[test]
    fn filtering_twice_equals_once() {
        let filters = FilterSet::new().search("io").with_enum("role", "OPERATOR");
        let once = apply_filters(&users(), &filters);
        let twice = apply_filters(&once, &filters);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn unsupported_enum_field_never_matches() {
        let filters = FilterSet::new().with_enum("chain", "ethereum");
        assert!(apply_filters(&users(), &filters).is_empty());
    }

    #[test]
    fn audit_search_covers_ip_address() {
        let logs = vec![
            AuditLog {
                id: "a-1".to_string(),
                action: "login".to_string(),
                ip_address: Some("10.0.0.7".to_string()),
                ..AuditLog::default()
            },
            AuditLog {
                id: "a-2".to_string(),
                action: "wallet.freeze".to_string(),
                resource_type: Some("wallet".to_string()),
                ..AuditLog::default()
            },
        ];
        let by_ip = apply_filters(&logs, &FilterSet::new().search("10.0.0"));
        assert_eq!(by_ip.len(), 1);
        let by_type = apply_filters(&logs, &FilterSet::new().search("WALLET"));
        let ids: Vec<&str> = by_type.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["a-2"]);
    }
}
