//! Draft records: the user-entered field values of one document.
//!
//! Drafts arrive as free-form JSON from the backend. Nothing here ever fails
//! on a missing or oddly-typed field; lookups fall back to an empty string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use super::date::format_date;

/// A single scalar stored under a draft key.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftValue {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
    /// Arrays and objects, kept as compact JSON.
    Structured(String),
}

impl DraftValue {
    /// String form of the value; `Null` renders as an empty string.
    pub fn as_text(&self) -> String {
        match self {
            DraftValue::Text(s) => s.clone(),
            DraftValue::Number(n) => format_number(n),
            DraftValue::Bool(b) => b.to_string(),
            DraftValue::Null => String::new(),
            DraftValue::Structured(json) => json.clone(),
        }
    }

    /// Numeric view of the value. Text is accepted when it parses as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DraftValue::Number(n) => n.as_f64(),
            DraftValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

impl From<Value> for DraftValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => DraftValue::Text(s),
            Value::Number(n) => DraftValue::Number(n),
            Value::Bool(b) => DraftValue::Bool(b),
            Value::Null => DraftValue::Null,
            other => DraftValue::Structured(other.to_string()),
        }
    }
}

fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(v) = n.as_f64() {
            if v.fract() == 0.0 && v.abs() < 1e15 {
                return format!("{}", v as i64);
            }
        }
    }
    n.to_string()
}

/// Field values of one draft, sorted by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    fields: BTreeMap<String, DraftValue>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON value. Anything other than an object yields
    /// an empty record.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                fields: map
                    .into_iter()
                    .map(|(k, v)| (k, DraftValue::from(v)))
                    .collect(),
            },
            _ => Self::default(),
        }
    }

    /// String value for `key`, or `""` when absent or null.
    pub fn text(&self, key: &str) -> String {
        self.fields.get(key).map(DraftValue::as_text).unwrap_or_default()
    }

    /// First non-empty string among `keys`.
    pub fn text_any(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|k| self.text(k))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    /// Value for `key` rendered through [`format_date`].
    pub fn date(&self, key: &str) -> String {
        format_date(&self.text(key))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(DraftValue::as_f64)
    }

    pub fn is_blank(&self, key: &str) -> bool {
        self.text(key).trim().is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for DraftRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(DraftRecord::from_json).unwrap_or_default())
    }
}

impl Serialize for DraftRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, String> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_text()))
            .collect();
        map.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_fields_render_empty() {
        let draft = DraftRecord::from_json(json!({ "tenant_name": null }));
        assert_eq!(draft.text("tenant_name"), "");
        assert_eq!(draft.text("landlord_name"), "");
        assert!(draft.is_blank("tenant_name"));
    }

    #[test]
    fn test_scalar_values_are_stringified() {
        let draft = DraftRecord::from_json(json!({
            "rent_amount": 1200,
            "late_fee": 12.5,
            "deposit_amount": 1500.0,
            "pets": false,
            "tenant_name": "Jane Tenant"
        }));

        assert_eq!(draft.text("rent_amount"), "1200");
        assert_eq!(draft.text("late_fee"), "12.5");
        assert_eq!(draft.text("deposit_amount"), "1500");
        assert_eq!(draft.text("pets"), "false");
        assert_eq!(draft.text("tenant_name"), "Jane Tenant");
    }

    #[test]
    fn test_structured_values_become_json() {
        let draft = DraftRecord::from_json(json!({ "co_tenants": ["A", "B"] }));
        assert_eq!(draft.text("co_tenants"), r#"["A","B"]"#);
    }

    #[test]
    fn test_non_object_json_is_empty() {
        assert!(DraftRecord::from_json(json!("oops")).is_empty());
        assert!(DraftRecord::from_json(json!([1, 2, 3])).is_empty());
        assert!(DraftRecord::from_json(Value::Null).is_empty());
    }

    #[test]
    fn test_keys_are_sorted() {
        let draft = DraftRecord::from_json(json!({ "b": 1, "a": 2, "c": 3 }));
        assert_eq!(draft.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_number_accepts_numeric_text() {
        let draft = DraftRecord::from_json(json!({ "a": "42.5", "b": "n/a", "c": 7 }));
        assert_eq!(draft.number("a"), Some(42.5));
        assert_eq!(draft.number("b"), None);
        assert_eq!(draft.number("c"), Some(7.0));
    }

    #[test]
    fn test_text_any_prefers_first_non_empty() {
        let draft = DraftRecord::from_json(json!({ "otice_date": "2024-01-05", "notice_date": "" }));
        assert_eq!(draft.text_any(&["notice_date", "otice_date"]), "2024-01-05");
    }

    #[test]
    fn test_deserialize_null_column() {
        let draft: DraftRecord = serde_json::from_str("null").unwrap();
        assert!(draft.is_empty());
    }
}
