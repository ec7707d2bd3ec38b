//! Per-device discovery pipeline
//!
//! For every listed device: property list (cached per type and feature),
//! static data for extended feature codes, schema resolution and narrowing,
//! last-hour power for metered devices, and the self-check fault list. A
//! failing step only degrades the device it belongs to, unless the failure
//! means the session has to re-authenticate.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Local, Timelike};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::properties::PropertyListCache;
use crate::errors::ClientError;
use crate::http::client::HttpClient;
use crate::models::device::{status_string, DeviceRecord, PropertyDescriptor};
use crate::schema::attribute::POWER_CONSUMPTION_KEY;
use crate::schema::registry::{Resolved, Schema, SchemaRegistry};

/// Outcome of discovering one device
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub record: DeviceRecord,
    pub resolved: Resolved,
    pub schema: Arc<Schema>,
    pub static_data: Option<Map<String, Value>>,
}

/// Borrowed collaborators of one discovery run
pub struct Discovery<'a> {
    pub http: &'a HttpClient,
    pub registry: &'a SchemaRegistry,
    pub cache: &'a PropertyListCache,
}

impl Discovery<'_> {
    /// Enrich one listed device. `Ok(None)` when the type is unsupported.
    pub async fn discover(
        &self,
        mut record: DeviceRecord,
    ) -> Result<Option<DiscoveredDevice>, ClientError> {
        let device_type = record.device_type_code.clone();
        let feature_code = record.device_feature_code.clone();

        let resolved = match self.registry.resolve(&device_type, &feature_code) {
            Ok(resolved) => resolved,
            Err(_) => {
                warn!(
                    "Skipping unsupported device {} ({}-{})",
                    record.device_id, device_type, feature_code
                );
                return Ok(None);
            }
        };
        debug!("Discovering device:\n{}", record.debug_info());

        let properties = degrade(
            self.property_list(&device_type, &feature_code).await,
            "property list",
            &record,
        )?
        .unwrap_or_default();

        let static_data = if feature_code.contains("99") {
            degrade(
                self.http.query_static_data(&record.puid).await,
                "static data",
                &record,
            )?
        } else {
            None
        };

        let mut schema = if resolved.kind.supports_narrowing() && !properties.is_empty() {
            self.registry.narrow(&resolved.schema, &properties)
        } else {
            resolved.schema.as_ref().clone()
        };

        if has_power_metering(&device_type, &properties) {
            if let Some(value) = degrade(self.last_hour_power(&record).await, "power", &record)?.flatten() {
                debug!("Power consumption of {}: {}", record.device_id, value);
                record.status.insert(POWER_CONSUMPTION_KEY.to_string(), value);
            }
        } else {
            schema = schema.without(POWER_CONSUMPTION_KEY);
        }

        if let Some(report) = degrade(self.http.self_check(&record.puid).await, "self-check", &record)? {
            record.failed_keys = report.failed_keys();
        }

        Ok(Some(DiscoveredDevice {
            record,
            resolved,
            schema: Arc::new(schema),
            static_data,
        }))
    }

    async fn property_list(
        &self,
        device_type: &str,
        feature_code: &str,
    ) -> Result<Vec<PropertyDescriptor>, ClientError> {
        if let Some(properties) = self.cache.get(device_type, feature_code).await {
            return Ok(properties);
        }

        let properties = self.http.get_property_list(device_type, feature_code).await?;
        self.cache
            .insert(device_type, feature_code, properties.clone())
            .await;
        Ok(properties)
    }

    /// Consumption of the previous hour, as a status string
    async fn last_hour_power(&self, record: &DeviceRecord) -> Result<Option<String>, ClientError> {
        let now = Local::now();
        let power = self.http.get_hour_power(now.date_naive(), &record.puid).await?;
        let previous_hour = (now - ChronoDuration::hours(1)).hour().to_string();
        Ok(power.get(&previous_hour).and_then(status_string))
    }
}

/// Whether the property list shows the device reports its consumption
pub fn has_power_metering(device_type: &str, properties: &[PropertyDescriptor]) -> bool {
    let listed = |key: &str| properties.iter().any(|p| p.property_key == key);
    match device_type {
        "009" => ["f_power_display", "f_cool_qvalue", "f_heat_qvalue"]
            .iter()
            .any(|key| listed(key)),
        "008" | "006" | "007" => listed("f_power_display"),
        _ => false,
    }
}

/// Log a failed enrichment step and carry on, unless re-authentication is needed
fn degrade<T>(
    result: Result<T, ClientError>,
    step: &str,
    record: &DeviceRecord,
) -> Result<Option<T>, ClientError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.requires_reauthentication() => Err(e),
        Err(e) => {
            warn!("Failed to get {} for device {}: {}", step, record.device_id, e);
            Ok(None)
        }
    }
}
