//! Device models

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Device type codes the client knows how to handle
pub const SUPPORTED_DEVICE_TYPES: [&str; 9] =
    ["009", "008", "007", "006", "016", "035", "013", "044", "043"];

/// A device as reported by the device list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// WiFi module id
    #[serde(default, deserialize_with = "lenient_string")]
    pub wifi_id: Option<String>,

    /// Session scoped device id
    #[serde(default, deserialize_with = "lenient_required")]
    pub device_id: String,

    /// Persistent vendor product id
    #[serde(default, deserialize_with = "lenient_required")]
    pub puid: String,

    /// User given name
    #[serde(rename = "deviceNickName", default, deserialize_with = "lenient_required")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_required")]
    pub device_type_code: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub device_type_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_required")]
    pub device_feature_code: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub device_feature_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub bind_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub room_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub room_name: Option<String>,

    /// Raw status map, every value kept as a string
    #[serde(rename = "statusList", default, deserialize_with = "status_map")]
    pub status: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub use_time: Option<String>,

    /// 1 when the device is online
    #[serde(default, deserialize_with = "lenient_int")]
    pub offline_state: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub seq: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub create_time: Option<String>,

    /// Status keys currently reported as faulted by the self-check
    #[serde(skip)]
    pub failed_keys: Vec<String>,
}

impl DeviceRecord {
    /// Whether the device is online
    pub fn is_online(&self) -> bool {
        self.offline_state == Some(1)
    }

    /// Whether the device is switched on
    pub fn is_on(&self) -> bool {
        self.status_value("t_power") == Some("1")
    }

    /// Whether the device type is handled by the client
    pub fn is_supported(&self) -> bool {
        SUPPORTED_DEVICE_TYPES.contains(&self.device_type_code.as_str())
    }

    /// Raw status value
    pub fn status_value(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    /// Whether the raw status carries `key`
    pub fn has_attribute(&self, key: &str) -> bool {
        self.status.contains_key(key)
    }

    /// Multi-line description used in debug logs
    pub fn debug_info(&self) -> String {
        let status = self
            .status
            .iter()
            .map(|(k, v)| format!("    {}: {}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Device: {} ({})\n  puid: {}\n  type: {}-{} {}\n  room: {}\n  online: {}, power: {}\n  status:\n{}",
            self.name,
            self.device_id,
            self.puid,
            self.device_type_code,
            self.device_feature_code,
            self.device_feature_name.as_deref().unwrap_or(""),
            self.room_name.as_deref().unwrap_or("-"),
            self.is_online(),
            self.is_on(),
            status
        )
    }
}

/// One entry of the property list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    #[serde(default)]
    pub property_key: String,

    /// Comma separated values or `lo~hi` ranges the device accepts
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub property_value_list: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyDescriptor {
    pub fn new(key: impl Into<String>, value_list: Option<&str>) -> Self {
        Self {
            property_key: key.into(),
            property_value_list: value_list.map(str::to_string),
            extra: Map::new(),
        }
    }
}

/// Payload of the self-check endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckReport {
    #[serde(default)]
    pub self_check_failed_list: Vec<SelfCheckFailure>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckFailure {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status_key: Option<String>,
}

impl SelfCheckReport {
    /// Status keys of the failed checks
    pub fn failed_keys(&self) -> Vec<String> {
        self.self_check_failed_list
            .iter()
            .filter_map(|f| f.status_key.clone())
            .collect()
    }
}

/// Hourly power consumption keyed by hour of day ("0" to "23")
pub type HourlyPower = Map<String, Value>;

/// Render a JSON scalar the way the vendor writes status values
pub fn status_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1".into() } else { "0".into() }),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(status_string))
}

fn lenient_required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn status_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        if value.is_some() {
            tracing::warn!("Ignoring non-object statusList");
        }
        return Ok(BTreeMap::new());
    };

    Ok(map
        .iter()
        .filter_map(|(k, v)| status_string(v).map(|v| (k.clone(), v)))
        .collect())
}
