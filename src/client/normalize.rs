//! Normalization boundary for backend response shapes.
//!
//! List endpoints are not consistent: some return a bare array, some an
//! object map of id → entity, some a paged envelope. Every list body goes
//! through [`normalize_list`] right after it arrives, so nothing downstream
//! ever sees more than the one canonical [`Page`] shape.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ConsoleError;

/// Envelope keys that may hold the item list.
const ITEM_KEYS: [&str; 3] = ["data", "items", "results"];

/// Envelope keys that may hold the total record count.
const TOTAL_KEYS: [&str; 3] = ["total", "total_count", "count"];

/// One fetched page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in backend order.
    pub items: Vec<T>,
    /// Total records on the backend, when reported.
    pub total: Option<u64>,
}

impl<T> Page<T> {
    /// Total records, falling back to the number of items on this page.
    #[must_use]
    pub fn total_or_len(&self) -> u64 {
        self.total.unwrap_or(self.items.len() as u64)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: None,
        }
    }
}

/// Converts a list response of any supported shape into a [`Page`].
///
/// Accepted shapes:
/// - `[...]`
/// - `{"data" | "items" | "results": [...] | {...} | null, "total": n}`
/// - `{"id-1": {...}, "id-2": {...}}` (object map, values in key order)
/// - `null` (empty page)
///
/// # Errors
///
/// Returns [`ConsoleError::Decode`] if the body is a scalar or an item does
/// not match `T`.
pub fn normalize_list<T>(value: Value) -> Result<Page<T>, ConsoleError>
where
    T: DeserializeOwned,
{
    match value {
        Value::Null => Ok(Page::default()),
        Value::Array(items) => Ok(Page {
            items: decode_items(items)?,
            total: None,
        }),
        Value::Object(mut map) => {
            let total = TOTAL_KEYS
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_u64));
            let envelope = ITEM_KEYS.iter().find_map(|k| match map.get(*k) {
                Some(Value::Array(_) | Value::Object(_) | Value::Null) => Some(*k),
                _ => None,
            });
            let items = match envelope.and_then(|k| map.remove(k)) {
                Some(Value::Array(items)) => items,
                Some(Value::Object(inner)) => inner.into_iter().map(|(_, v)| v).collect(),
                Some(Value::Null) => Vec::new(),
                _ => map.into_iter().map(|(_, v)| v).collect(),
            };
            let total = if envelope.is_some() { total } else { None };
            Ok(Page {
                items: decode_items(items)?,
                total,
            })
        }
        other => Err(ConsoleError::Decode(format!(
            "expected a list, got {}",
            type_name(&other)
        ))),
    }
}

/// Converts a single-entity response into `T`, unwrapping a `{"data": {...}}`
/// envelope when present.
///
/// # Errors
///
/// Returns [`ConsoleError::Decode`] if the body does not match `T`.
pub fn normalize_one<T>(value: Value) -> Result<T, ConsoleError>
where
    T: DeserializeOwned,
{
    let value = match value {
        Value::Object(mut map) if is_data_envelope(&map) => map.remove("data").unwrap_or_default(),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// A `{"data": {...}}` wrapper, optionally with one sibling such as
/// `"meta"` or `"success"`.
fn is_data_envelope(map: &serde_json::Map<String, Value>) -> bool {
    map.len() <= 2 && matches!(map.get("data"), Some(Value::Object(_)))
}

fn decode_items<T>(items: Vec<Value>) -> Result<Vec<T>, ConsoleError>
where
    T: DeserializeOwned,
{
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ConsoleError::from))
        .collect()
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    fn ids(page: &Page<Item>) -> Vec<&str> {
        page.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn bare_array_is_accepted() {
        let Ok(page) = normalize_list::<Item>(json!([{"id": "a"}, {"id": "b"}])) else {
            panic!("array should normalize");
        };
        assert_eq!(ids(&page), ["a", "b"]);
        assert_eq!(page.total, None);
        assert_eq!(page.total_or_len(), 2);
    }

    #[test]
    fn object_map_becomes_list() {
        let Ok(page) = normalize_list::<Item>(json!({"x": {"id": "a"}, "y": {"id": "b"}})) else {
            panic!("map should normalize");
        };
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn envelope_with_total() {
        let body = json!({"data": [{"id": "a"}], "total": 41, "offset": 0});
        let Ok(page) = normalize_list::<Item>(body) else {
            panic!("envelope should normalize");
        };
        assert_eq!(ids(&page), ["a"]);
        assert_eq!(page.total, Some(41));
    }

    #[test]
    fn envelope_holding_a_map() {
        let body = json!({"items": {"k": {"id": "a"}}, "count": 1});
        let Ok(page) = normalize_list::<Item>(body) else {
            panic!("envelope map should normalize");
        };
        assert_eq!(ids(&page), ["a"]);
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn null_is_an_empty_page() {
        let Ok(page) = normalize_list::<Item>(Value::Null) else {
            panic!("null should normalize");
        };
        assert!(page.items.is_empty());
    }

    #[test]
    fn null_envelope_is_an_empty_page() {
        let Ok(page) = normalize_list::<Item>(json!({"data": null, "total": 0})) else {
            panic!("null envelope should normalize");
        };
        assert!(page.items.is_empty());
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn scalar_is_a_decode_error() {
        let result = normalize_list::<Item>(json!("oops"));
        assert!(matches!(result, Err(ConsoleError::Decode(_))));
    }

    #[test]
    fn single_entity_envelope_is_unwrapped() {
        let Ok(item) = normalize_one::<Item>(json!({"data": {"id": "z"}})) else {
            panic!("envelope should unwrap");
        };
        assert_eq!(item.id, "z");

        let Ok(item) = normalize_one::<Item>(json!({"id": "y"})) else {
            panic!("plain entity should decode");
        };
        assert_eq!(item.id, "y");
    }
}
