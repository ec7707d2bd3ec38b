//! Status codec: raw status to typed values, and write validation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::device::status_string;
use crate::schema::attribute::{parse_number, range_contains, ValueKind};
use crate::schema::registry::Schema;

/// A parsed status value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusValue {
    Number(f64),
    /// Enum label, or a raw value passed through
    Text(String),
}

impl StatusValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatusValue::Text(s) => Some(s),
            StatusValue::Number(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatusValue::Number(n) => Some(*n),
            StatusValue::Text(_) => None,
        }
    }
}

/// Parse the raw status of a device.
///
/// Keys unknown to the schema are dropped. A `Number` value that does not
/// parse is logged and skipped.
pub fn parse_status(
    schema: &Schema,
    raw: &BTreeMap<String, String>,
) -> BTreeMap<String, StatusValue> {
    let mut parsed = BTreeMap::new();

    for attribute in schema.attributes() {
        let Some(value) = raw.get(&attribute.key) else {
            continue;
        };

        let parsed_value = if let Some(label) = attribute.label(value) {
            StatusValue::Text(label.to_string())
        } else if attribute.kind == ValueKind::Number {
            match parse_number(value) {
                Some(number) => StatusValue::Number(number),
                None => {
                    warn!(
                        "Failed to parse attribute {} ({}) with value {}",
                        attribute.key, attribute.name, value
                    );
                    continue;
                }
            }
        } else {
            StatusValue::Text(value.clone())
        };

        parsed.insert(attribute.key.clone(), parsed_value);
    }

    parsed
}

/// Whether `value` may be written to `key`. Never errors, rejects when unsure.
pub fn validate_write(schema: &Schema, key: &str, value: &Value) -> bool {
    let Some(attribute) = schema.get(key) else {
        warn!("Attribute {} not found", key);
        return false;
    };

    if !attribute.is_writable() {
        warn!("Attribute {} is read-only", key);
        return false;
    }

    if let Some(range) = attribute.value_range.as_deref() {
        let verdict = numeric(value).and_then(|number| range_contains(range, number));
        return match verdict {
            Some(true) => true,
            Some(false) => {
                warn!("Value {} is outside valid range {}", value, range);
                false
            }
            None => {
                warn!("Failed to validate {} against range {}", value, range);
                false
            }
        };
    }

    if let Some(map) = attribute.value_map.as_ref() {
        let valid = status_string(value).is_some_and(|code| map.contains_key(&code));
        if !valid {
            warn!(
                "Value {} not in valid values: {:?}",
                value,
                map.keys().collect::<Vec<_>>()
            );
        }
        return valid;
    }

    true
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
