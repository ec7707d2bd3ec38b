//! Attribute schema: the description of one device property

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic type of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Enum,
    Number,
    String,
}

/// Whether a property can be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessMode {
    #[serde(rename = "R")]
    ReadOnly,
    #[serde(rename = "RW")]
    ReadWrite,
}

/// Static attribute definition as stored in the device tables
#[derive(Debug, Clone, Copy)]
pub struct AttributeDef {
    pub key: &'static str,
    pub name: &'static str,
    pub kind: ValueKind,
    pub step: u32,
    pub range: Option<&'static str>,
    pub values: &'static [(&'static str, &'static str)],
    pub access: AccessMode,
}

impl AttributeDef {
    pub const fn enumeration(
        key: &'static str,
        name: &'static str,
        range: &'static str,
        values: &'static [(&'static str, &'static str)],
        access: AccessMode,
    ) -> Self {
        Self {
            key,
            name,
            kind: ValueKind::Enum,
            step: 1,
            range: Some(range),
            values,
            access,
        }
    }

    pub const fn number(
        key: &'static str,
        name: &'static str,
        step: u32,
        range: Option<&'static str>,
        access: AccessMode,
    ) -> Self {
        Self {
            key,
            name,
            kind: ValueKind::Number,
            step,
            range,
            values: &[],
            access,
        }
    }

    pub const fn string(key: &'static str, name: &'static str, access: AccessMode) -> Self {
        Self {
            key,
            name,
            kind: ValueKind::String,
            step: 1,
            range: None,
            values: &[],
            access,
        }
    }
}

/// Owned attribute schema, the unit schemas are built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub key: String,
    pub name: String,
    pub kind: ValueKind,
    pub step: u32,

    /// Comma separated literals and/or `lo~hi` intervals
    pub value_range: Option<String>,

    /// Raw code to label
    pub value_map: Option<BTreeMap<String, String>>,

    pub access: AccessMode,
}

impl AttributeSchema {
    /// Synthetic read-only power consumption attribute
    pub fn power_consumption() -> Self {
        Self::from(&AttributeDef::number(
            POWER_CONSUMPTION_KEY,
            "Power Consumption",
            1,
            None,
            AccessMode::ReadOnly,
        ))
    }

    pub fn is_writable(&self) -> bool {
        self.access == AccessMode::ReadWrite
    }

    /// Label of a raw code, if the value map knows it
    pub fn label(&self, raw: &str) -> Option<&str> {
        self.value_map
            .as_ref()
            .and_then(|map| map.get(raw))
            .map(String::as_str)
    }
}

impl From<&AttributeDef> for AttributeSchema {
    fn from(def: &AttributeDef) -> Self {
        let value_map = if def.values.is_empty() {
            None
        } else {
            Some(
                def.values
                    .iter()
                    .map(|(code, label)| (code.to_string(), label.to_string()))
                    .collect(),
            )
        };

        Self {
            key: def.key.to_string(),
            name: def.name.to_string(),
            kind: def.kind,
            step: def.step,
            value_range: def.range.map(str::to_string),
            value_map,
            access: def.access,
        }
    }
}

/// Key of the power consumption attribute
pub const POWER_CONSUMPTION_KEY: &str = "f_power_consumption";

/// Check `value` against a range such as `"16~32,61~90"`.
///
/// Segments are tried in order; `None` when a segment consulted before a
/// match does not parse.
pub fn range_contains(range: &str, value: f64) -> Option<bool> {
    for segment in range.split(',') {
        let segment = segment.trim();
        if segment.contains('~') {
            let mut bounds = segment.split('~');
            let (lo, hi) = match (bounds.next(), bounds.next(), bounds.next()) {
                (Some(lo), Some(hi), None) => (parse_number(lo)?, parse_number(hi)?),
                _ => return None,
            };
            if lo <= value && value <= hi {
                return Some(true);
            }
        } else if parse_number(segment)? == value {
            return Some(true);
        }
    }
    Some(false)
}

/// Lenient float parsing of vendor values
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
