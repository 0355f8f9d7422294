//! Immutable composite cache key.
//!
//! [`CacheKey`] is an ordered tuple of a [`Resource`] and the request
//! parameters that shaped the read. Two reads share a cache slot (and an
//! in-flight request) exactly when their keys are equal.

use std::fmt;

use super::Resource;

/// Identity of one cached read.
///
/// Parameters keep their insertion order; callers build keys from the same
/// parameter struct so equal requests always produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl CacheKey {
    /// Creates a key for `resource` with no parameters.
    #[must_use]
    pub const fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a parameter only when `value` is present.
    #[must_use]
    pub fn with_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Returns the resource this key belongs to.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        self.resource
    }

    /// Returns the ordered parameter list.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource.as_str())?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_params_give_equal_keys() {
        let a = CacheKey::new(Resource::Users).with("offset", 0).with("limit", 20);
        let b = CacheKey::new(Resource::Users).with("offset", 0).with("limit", 20);
        assert_eq!(a, b);
    }

    #[test]
    fn different_resources_differ() {
        let a = CacheKey::new(Resource::Deposits).with("limit", 20);
        let b = CacheKey::new(Resource::Withdrawals).with("limit", 20);
        assert_ne!(a, b);
    }

    #[test]
    fn absent_optional_params_are_skipped() {
        let key = CacheKey::new(Resource::Wallets).with_opt("status", None::<&str>);
        assert!(key.params().is_empty());
    }

    #[test]
    fn display_renders_query_string() {
        let key = CacheKey::new(Resource::AuditLogs)
            .with("offset", 40)
            .with_opt("status", Some("failure"));
        assert_eq!(key.to_string(), "audit_logs?offset=40&status=failure");
    }
}
