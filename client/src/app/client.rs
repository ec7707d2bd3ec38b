//! Device client: the entry point for presentation and integration layers

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::app::discovery::{DiscoveredDevice, Discovery};
use crate::authn::oauth::OAuthClient;
use crate::authn::token_mngr::TokenManager;
use crate::cache::properties::PropertyListCache;
use crate::errors::ClientError;
use crate::filesys::dir::Dir;
use crate::http::client::HttpClient;
use crate::models::device::DeviceRecord;
use crate::schema::codec::{self, StatusValue};
use crate::schema::registry::{Schema, SchemaRegistry};
use crate::storage::settings::Settings;
use crate::storage::token::TokenStore;
use crate::utils::user_agent;

/// A discovered device with its schema assignment
#[derive(Debug, Clone)]
pub struct ManagedDevice {
    pub record: DeviceRecord,
    pub schema: Arc<Schema>,
}

#[derive(Default)]
struct DeviceState {
    devices: HashMap<String, ManagedDevice>,
    static_data: HashMap<String, Map<String, Value>>,
}

/// One logical session against the vendor cloud
pub struct DeviceClient {
    http: Arc<HttpClient>,
    token_mngr: Arc<TokenManager>,
    registry: SchemaRegistry,
    property_cache: PropertyListCache,
    state: RwLock<DeviceState>,
}

impl DeviceClient {
    /// Build the client and its collaborators from settings
    pub async fn new(settings: &Settings) -> Result<Self, ClientError> {
        info!("Initializing device client...");

        let oauth_http = Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(user_agent())
            .build()?;
        let oauth = OAuthClient::new(oauth_http, settings.credentials.clone(), &settings.endpoints);
        let store = TokenStore::new(settings.token_file());
        let token_mngr = Arc::new(
            TokenManager::new(oauth, store)
                .await?
                .with_refresh_margin(settings.refresh_margin()),
        );

        let http = Arc::new(HttpClient::new(
            &settings.endpoints.api_base_url,
            settings.credentials.clone(),
            token_mngr.clone(),
            settings.request_timeout(),
        )?);

        let cache_dir = Dir::new(settings.cache_dir()).subdir("properties");
        let property_cache = PropertyListCache::new(cache_dir, settings.property_cache_max_age());

        Ok(Self::from_parts(http, token_mngr, property_cache))
    }

    /// Assemble a client from already built collaborators
    pub fn from_parts(
        http: Arc<HttpClient>,
        token_mngr: Arc<TokenManager>,
        property_cache: PropertyListCache,
    ) -> Self {
        Self {
            http,
            token_mngr,
            registry: SchemaRegistry::new(),
            property_cache,
            state: RwLock::new(DeviceState::default()),
        }
    }

    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.token_mngr
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Fetch the device list and discover every supported device.
    ///
    /// Known devices are replaced wholesale; devices no longer listed are
    /// forgotten.
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, ClientError> {
        debug!("Fetching device list with status");
        let listed = self.http.get_device_list().await.map_err(|e| {
            error!("Failed to fetch devices: {}", e);
            e
        })?;
        debug!("Found {} devices in response", listed.len());

        let discovery = Discovery {
            http: &self.http,
            registry: &self.registry,
            cache: &self.property_cache,
        };

        let mut discovered: Vec<DiscoveredDevice> = Vec::with_capacity(listed.len());
        for record in listed {
            if let Some(device) = discovery.discover(record).await? {
                discovered.push(device);
            }
        }

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.devices.clear();
        state.static_data.clear();

        let mut records = Vec::with_capacity(discovered.len());
        for device in discovered {
            let device_id = device.record.device_id.clone();
            debug!(
                "Device {} uses the {} schema ({:?} match)",
                device_id, device.resolved.kind, device.resolved.rule
            );
            if let Some(data) = device.static_data {
                state.static_data.insert(device_id.clone(), data);
            }
            records.push(device.record.clone());
            state.devices.insert(
                device_id,
                ManagedDevice {
                    record: device.record,
                    schema: device.schema,
                },
            );
        }

        info!("Discovered {} supported devices", records.len());
        Ok(records)
    }

    /// Parsed status of a device, discovering devices first if it is unknown
    pub async fn get_device_status(
        &self,
        device_id: &str,
    ) -> Result<BTreeMap<String, StatusValue>, ClientError> {
        let device = match self.device(device_id) {
            Some(device) => device,
            None => {
                self.list_devices().await?;
                self.device(device_id)
                    .ok_or_else(|| ClientError::NotFound(format!("Device not found: {}", device_id)))?
            }
        };
        Ok(self.parse_device_status(&device.record))
    }

    /// Write properties after validating every one of them.
    ///
    /// Returns the state echoed back by the vendor; keys it does not echo
    /// are not assumed to have changed. The stored record is left alone,
    /// the next discovery refreshes it.
    pub async fn control_device(
        &self,
        puid: &str,
        properties: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ClientError> {
        let device = match self.device_by_puid(puid) {
            Some(device) => device,
            None => {
                self.list_devices().await?;
                self.device_by_puid(puid)
                    .ok_or_else(|| ClientError::NotFound(format!("Device not found: {}", puid)))?
            }
        };

        let rejected: Vec<String> = properties
            .iter()
            .filter(|(key, value)| !codec::validate_write(&device.schema, key, value))
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        if !rejected.is_empty() {
            return Err(ClientError::ValidationError(format!(
                "Invalid values for device {}: {}",
                puid,
                rejected.join(", ")
            )));
        }

        info!("Controlling device {} with {} properties", puid, properties.len());
        self.http.control_device(puid, properties).await.map_err(|e| {
            error!("Failed to control device {}: {}", puid, e);
            e
        })
    }

    /// Parse a device's raw status with its assigned schema.
    ///
    /// Without an assignment the raw status is returned as text.
    pub fn parse_device_status(&self, device: &DeviceRecord) -> BTreeMap<String, StatusValue> {
        match self.device_schema(&device.device_id) {
            Some(schema) => codec::parse_status(&schema, &device.status),
            None => {
                warn!("No schema found for device {}", device.device_id);
                device
                    .status
                    .iter()
                    .map(|(k, v)| (k.clone(), StatusValue::Text(v.clone())))
                    .collect()
            }
        }
    }

    /// Forget the session, its devices and the cached property lists
    pub async fn logout(&self) -> Result<(), ClientError> {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            *state = DeviceState::default();
        }
        self.property_cache.clear().await?;
        self.token_mngr.logout().await
    }

    /// Records of all discovered devices
    pub fn devices(&self) -> Vec<DeviceRecord> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.devices.values().map(|d| d.record.clone()).collect()
    }

    /// Discovered device by device id
    pub fn device(&self, device_id: &str) -> Option<ManagedDevice> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.devices.get(device_id).cloned()
    }

    /// Discovered device by puid
    pub fn device_by_puid(&self, puid: &str) -> Option<ManagedDevice> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.devices.values().find(|d| d.record.puid == puid).cloned()
    }

    /// Schema assigned to a device
    pub fn device_schema(&self, device_id: &str) -> Option<Arc<Schema>> {
        self.device(device_id).map(|d| d.schema)
    }

    /// Static capability data fetched during discovery
    pub fn static_data(&self, device_id: &str) -> Option<Map<String, Value>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.static_data.get(device_id).cloned()
    }
}
