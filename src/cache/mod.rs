//! Read cache shared by every console page.

pub mod policy;
pub mod query_cache;

pub use policy::{CachePolicies, CachePolicy};
pub use query_cache::QueryCache;
