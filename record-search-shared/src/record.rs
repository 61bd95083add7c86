//! Schema-less record payloads.

use serde_json::{Map, Value};

/// A schema-less record: an ordered mapping from field name to JSON value.
///
/// The primary store owns the canonical copy; the search index holds a
/// denormalized, possibly-stale mirror of it.
pub type Record = Map<String, Value>;

/// Extract the identifying field from a record as a string key.
///
/// String values are used as-is; integer values are rendered in decimal.
/// Any other value type (or an absent field) yields `None`, since the search
/// engine addresses documents by string keys only.
pub fn record_key(record: &Record, id_field: &str) -> Option<String> {
    match record.get(id_field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
