//! Device API client

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::ClientError;
use crate::http::client::HttpClient;
use crate::models::device::{DeviceRecord, HourlyPower, PropertyDescriptor, SelfCheckReport};

pub const API_DEVICE_LIST: &str = "/clife-svc/pu/get_device_status_list";
pub const API_PROPERTY_LIST: &str = "/clife-svc/get_property_list";
pub const API_QUERY_STATIC_DATA: &str = "/clife-svc/pu/query_static_data";
pub const API_DEVICE_CONTROL: &str = "/device/pu/property/set";
pub const API_HOUR_POWER: &str = "/clife-svc/pu/get_hour_power";
pub const API_SELF_CHECK: &str = "/basic/self_check/info";

/// Property list query
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery<'a> {
    pub device_type_code: &'a str,
    pub device_feature_code: &'a str,
}

/// Device control request
#[derive(Debug, Clone, Serialize)]
pub struct ControlRequest<'a> {
    pub puid: &'a str,
    pub properties: &'a Map<String, Value>,
}

/// Hourly power request
#[derive(Debug, Clone, Serialize)]
pub struct HourPowerRequest<'a> {
    pub date: String,
    pub puid: &'a str,
}

/// Self-check request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCheckRequest<'a> {
    pub no_record: &'a str,
    pub puid: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct PuidRequest<'a> {
    puid: &'a str,
}

impl HttpClient {
    /// List the account's devices with their current status.
    ///
    /// Entries that do not decode into a device are logged and skipped.
    pub async fn get_device_list(&self) -> Result<Vec<DeviceRecord>, ClientError> {
        let envelope = self.get(API_DEVICE_LIST, Map::new()).await?;
        let entries: Vec<Value> = envelope.field("deviceList")?;
        Ok(decode_devices(entries))
    }

    /// Properties exposed by a (type, feature) pair
    pub async fn get_property_list(
        &self,
        device_type_code: &str,
        device_feature_code: &str,
    ) -> Result<Vec<PropertyDescriptor>, ClientError> {
        let query = PropertyListQuery {
            device_type_code,
            device_feature_code,
        };
        let envelope = self.get(API_PROPERTY_LIST, to_fields(&query)?).await?;
        envelope.field("properties")
    }

    /// Static capability data of a device
    pub async fn query_static_data(&self, puid: &str) -> Result<Map<String, Value>, ClientError> {
        let envelope = self
            .post(API_QUERY_STATIC_DATA, to_fields(&PuidRequest { puid })?)
            .await?;
        envelope.field("data")
    }

    /// Write properties; returns the key/value state echoed by the vendor
    pub async fn control_device(
        &self,
        puid: &str,
        properties: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ClientError> {
        let request = ControlRequest { puid, properties };
        let envelope = self.post(API_DEVICE_CONTROL, to_fields(&request)?).await?;
        envelope.field("kvMap")
    }

    /// Power consumption per hour of `date`
    pub async fn get_hour_power(
        &self,
        date: NaiveDate,
        puid: &str,
    ) -> Result<HourlyPower, ClientError> {
        let request = HourPowerRequest {
            date: date.format("%Y-%m-%d").to_string(),
            puid,
        };
        let envelope = self.post(API_HOUR_POWER, to_fields(&request)?).await?;
        envelope.field("powerConsumption")
    }

    /// Fault report of a device
    pub async fn self_check(&self, puid: &str) -> Result<SelfCheckReport, ClientError> {
        let request = SelfCheckRequest {
            no_record: "1",
            puid,
        };
        let envelope = self.post(API_SELF_CHECK, to_fields(&request)?).await?;
        envelope.field("data")
    }
}

fn decode_devices(entries: Vec<Value>) -> Vec<DeviceRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<DeviceRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping device list entry {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn to_fields<T: Serialize>(request: &T) -> Result<Map<String, Value>, ClientError> {
    match serde_json::to_value(request)? {
        Value::Object(fields) => Ok(fields),
        other => Err(ClientError::InvalidResponse(format!(
            "request must serialize to an object, got {}",
            other
        ))),
    }
}
