//! Device schema registry
//!
//! Maps a (device type, feature code) pair to the attribute table of a
//! device family and derives per-device narrowed schemas from the property
//! list the server reports for that device.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::device::PropertyDescriptor;
use crate::schema::attribute::{AttributeDef, AttributeSchema, POWER_CONSUMPTION_KEY};
use crate::schema::tables;

/// Device families with a dedicated attribute table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Fallback for climate types without a dedicated entry
    GenericClimate,
    SplitAc,
    WindowAc,
    PortableAc,
    Dehumidifier,
    HeatPump,
    Oven,
    AirToWaterHeatPump,
    Hub,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 9] = [
        DeviceKind::GenericClimate,
        DeviceKind::SplitAc,
        DeviceKind::WindowAc,
        DeviceKind::PortableAc,
        DeviceKind::Dehumidifier,
        DeviceKind::HeatPump,
        DeviceKind::Oven,
        DeviceKind::AirToWaterHeatPump,
        DeviceKind::Hub,
    ];

    /// Static attribute table of this family
    pub fn attributes(self) -> &'static [AttributeDef] {
        match self {
            DeviceKind::GenericClimate | DeviceKind::WindowAc | DeviceKind::PortableAc => {
                tables::CLIMATE
            }
            DeviceKind::SplitAc => tables::SPLIT_AC,
            DeviceKind::Dehumidifier => tables::DEHUMIDIFIER,
            DeviceKind::HeatPump => tables::HEAT_PUMP,
            DeviceKind::Oven => tables::OVEN,
            DeviceKind::AirToWaterHeatPump => tables::AIR_TO_WATER,
            DeviceKind::Hub => tables::HUB,
        }
    }

    /// Whether the schema is restricted to the reported property list
    pub fn supports_narrowing(self) -> bool {
        matches!(
            self,
            DeviceKind::GenericClimate
                | DeviceKind::SplitAc
                | DeviceKind::WindowAc
                | DeviceKind::PortableAc
                | DeviceKind::Dehumidifier
        )
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceKind::GenericClimate => "generic climate",
            DeviceKind::SplitAc => "split AC",
            DeviceKind::WindowAc => "window AC",
            DeviceKind::PortableAc => "portable AC",
            DeviceKind::Dehumidifier => "dehumidifier",
            DeviceKind::HeatPump => "heat pump",
            DeviceKind::Oven => "oven",
            DeviceKind::AirToWaterHeatPump => "air-to-water heat pump",
            DeviceKind::Hub => "hub",
        };
        f.write_str(name)
    }
}

/// Which lookup step matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Wildcard,
    Generic,
}

/// Registry entry; an empty feature code matches any feature of the type
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub device_type: &'static str,
    pub feature_code: &'static str,
    pub kind: DeviceKind,
}

const fn entry(device_type: &'static str, feature_code: &'static str, kind: DeviceKind) -> RegistryEntry {
    RegistryEntry {
        device_type,
        feature_code,
        kind,
    }
}

/// Dedicated entries, exact pairs and type wildcards
pub const ENTRIES: &[RegistryEntry] = &[
    entry("009", "199", DeviceKind::SplitAc),
    entry("008", "399", DeviceKind::WindowAc),
    entry("006", "299", DeviceKind::PortableAc),
    entry("035", "699", DeviceKind::HeatPump),
    entry("007", "", DeviceKind::Dehumidifier),
    entry("013", "", DeviceKind::Oven),
    entry("044", "", DeviceKind::AirToWaterHeatPump),
    entry("043", "", DeviceKind::Hub),
];

/// Legacy types served by a default table
pub const GENERIC_FALLBACK: &[(&str, DeviceKind)] = &[
    ("007", DeviceKind::Dehumidifier),
    ("009", DeviceKind::GenericClimate),
    ("008", DeviceKind::GenericClimate),
    ("006", DeviceKind::GenericClimate),
    ("016", DeviceKind::GenericClimate),
];

/// An immutable set of attribute schemas keyed by property key
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    kind: DeviceKind,
    attributes: BTreeMap<String, AttributeSchema>,
}

impl Schema {
    /// Build the base schema of a family
    pub fn from_kind(kind: DeviceKind) -> Self {
        let attributes = kind
            .attributes()
            .iter()
            .map(|def| (def.key.to_string(), AttributeSchema::from(def)))
            .collect();
        Self { kind, attributes }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&AttributeSchema> {
        self.attributes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeSchema> {
        self.attributes.values()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// A copy of this schema without `key`
    pub fn without(&self, key: &str) -> Schema {
        let mut attributes = self.attributes.clone();
        attributes.remove(key);
        Schema {
            kind: self.kind,
            attributes,
        }
    }

    /// Restrict to the reported properties.
    ///
    /// A property with a value list takes it as its range and, for enums,
    /// keeps only the labels of listed codes. A property without one keeps
    /// its base range and labels. The power consumption attribute is always
    /// present in the result.
    pub fn narrowed(&self, properties: &[PropertyDescriptor]) -> Schema {
        let mut attributes = BTreeMap::new();

        for property in properties {
            let Some(base) = self.attributes.get(&property.property_key) else {
                continue;
            };
            if attributes.contains_key(&property.property_key) {
                continue;
            }

            let mut attribute = base.clone();
            if let Some(list) = property
                .property_value_list
                .as_deref()
                .filter(|l| !l.trim().is_empty())
            {
                attribute.value_range = Some(list.to_string());
                if let Some(map) = attribute.value_map.as_mut() {
                    let allowed: Vec<&str> = list.split(',').map(str::trim).collect();
                    map.retain(|code, _| allowed.contains(&code.as_str()));
                }
            }
            attributes.insert(property.property_key.clone(), attribute);
        }

        attributes
            .entry(POWER_CONSUMPTION_KEY.to_string())
            .or_insert_with(AttributeSchema::power_consumption);

        Schema {
            kind: self.kind,
            attributes,
        }
    }
}

/// Result of a registry lookup
#[derive(Debug, Clone)]
pub struct Resolved {
    pub kind: DeviceKind,
    pub rule: MatchRule,
    pub schema: Arc<Schema>,
}

/// Registry of base schemas, built once and shared
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    base: HashMap<DeviceKind, Arc<Schema>>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let base = DeviceKind::ALL
            .iter()
            .map(|kind| (*kind, Arc::new(Schema::from_kind(*kind))))
            .collect();
        Self { base }
    }

    /// Find the device family: exact entry, type wildcard, generic fallback
    pub fn lookup(device_type: &str, feature_code: &str) -> Option<(DeviceKind, MatchRule)> {
        if let Some(e) = ENTRIES
            .iter()
            .find(|e| e.device_type == device_type && e.feature_code == feature_code)
        {
            return Some((e.kind, MatchRule::Exact));
        }

        if let Some(e) = ENTRIES
            .iter()
            .find(|e| e.device_type == device_type && e.feature_code.is_empty())
        {
            return Some((e.kind, MatchRule::Wildcard));
        }

        GENERIC_FALLBACK
            .iter()
            .find(|(t, _)| *t == device_type)
            .map(|(_, kind)| (*kind, MatchRule::Generic))
    }

    /// Resolve the base schema of a (type, feature) pair
    pub fn resolve(&self, device_type: &str, feature_code: &str) -> Result<Resolved, ClientError> {
        let Some((kind, rule)) = Self::lookup(device_type, feature_code) else {
            warn!("Unsupported device type: {}-{}", device_type, feature_code);
            return Err(ClientError::UnsupportedDeviceType {
                device_type: device_type.to_string(),
                feature_code: feature_code.to_string(),
            });
        };

        debug!(
            "Resolved {}-{} to {} ({:?} match)",
            device_type, feature_code, kind, rule
        );
        Ok(Resolved {
            kind,
            rule,
            schema: self.base_schema(kind),
        })
    }

    /// Shared base schema of a family
    pub fn base_schema(&self, kind: DeviceKind) -> Arc<Schema> {
        match self.base.get(&kind) {
            Some(schema) => Arc::clone(schema),
            None => Arc::new(Schema::from_kind(kind)),
        }
    }

    /// Derive the per-device schema from the reported property list
    pub fn narrow(&self, base: &Schema, properties: &[PropertyDescriptor]) -> Schema {
        base.narrowed(properties)
    }
}
