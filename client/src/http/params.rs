//! System parameters attached to every API call

use serde_json::{Map, Value};

use crate::utils::{generate_uuid, md5_hex};

/// Protocol version reported to the vendor
pub const PROTOCOL_VERSION: &str = "8.1";

/// Language id reported to the vendor
pub const LANGUAGE_ID: &str = "1";

/// Timezone reported to the vendor
pub const TIMEZONE: &str = "UTC";

/// Platform id reported to the vendor
pub const PLATFORM_ID: i64 = 5;

const SOURCE_ID_PREFIX: &str = "td001002000";

/// Generate a fresh source id: the fixed prefix followed by a random MD5
pub fn generate_source_id(timestamp_ms: i64) -> String {
    let seed = format!("{}{}", generate_uuid().replace('-', ""), timestamp_ms);
    format!("{}{}", SOURCE_ID_PREFIX, md5_hex(seed.as_bytes()))
}

/// Per-request random string
pub fn random_nonce(timestamp_ms: i64) -> String {
    md5_hex(format!("{}{}", generate_uuid(), timestamp_ms).as_bytes())
}

/// The canonical parameter set of one request
#[derive(Debug, Clone)]
pub struct SystemParams<'a> {
    pub timestamp_ms: i64,
    pub nonce: String,
    pub app_id: &'a str,
    pub source_id: &'a str,
    /// Only set for GET requests
    pub access_token: Option<&'a str>,
}

impl<'a> SystemParams<'a> {
    /// Parameters for a request sent at `timestamp_ms`
    pub fn new(timestamp_ms: i64, app_id: &'a str, source_id: &'a str) -> Self {
        Self {
            timestamp_ms,
            nonce: random_nonce(timestamp_ms),
            app_id,
            source_id,
            access_token: None,
        }
    }

    /// Attach the access token (GET only)
    pub fn with_access_token(mut self, access_token: &'a str) -> Self {
        self.access_token = Some(access_token);
        self
    }

    /// Merge into the caller's fields; system parameters win on conflict
    pub fn merge_into(self, fields: &mut Map<String, Value>) {
        fields.insert("timeStamp".into(), Value::from(self.timestamp_ms.to_string()));
        fields.insert("version".into(), Value::from(PROTOCOL_VERSION));
        fields.insert("languageId".into(), Value::from(LANGUAGE_ID));
        fields.insert("timezone".into(), Value::from(TIMEZONE));
        fields.insert("randStr".into(), Value::from(self.nonce));
        fields.insert("appId".into(), Value::from(self.app_id));
        fields.insert("sourceId".into(), Value::from(self.source_id));
        fields.insert("platformId".into(), Value::from(PLATFORM_ID));
        if let Some(token) = self.access_token {
            fields.insert("accessToken".into(), Value::from(token));
        }
    }
}

/// Render a parameter value for a query string; nested values become JSON
pub fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
