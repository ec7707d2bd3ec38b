//! Settings file management

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::errors::ClientError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::storage::layout::{expand_home, StorageLayout};

const PRODUCTION_OAUTH_URL: &str = "https://oauth.hijuconn.com";
const PRODUCTION_API_URL: &str = "https://juapi-3rd.hijuconn.com";
const TEST_OAUTH_URL: &str = "https://test-oauth.hijuconn.com";
const TEST_API_URL: &str = "https://test-juapi-3rd.hijuconn.com";

/// Client settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application credentials registered with the vendor
    #[serde(default)]
    pub credentials: AppCredentials,

    /// Vendor endpoints
    #[serde(default)]
    pub endpoints: EndpointSettings,

    /// Where the OAuth2 token record is persisted
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Root of the property list cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Refresh the access token this many seconds before it expires
    #[serde(default = "default_refresh_margin")]
    pub refresh_margin_secs: u64,

    /// Maximum age of a cached property list
    #[serde(default = "default_property_cache_max_age")]
    pub property_cache_max_age_secs: u64,

    /// HTTP request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_token_file() -> PathBuf {
    PathBuf::from("~/.connectlife_tokens.json")
}

fn default_cache_dir() -> PathBuf {
    StorageLayout::default().cache_dir().path().to_path_buf()
}

fn default_refresh_margin() -> u64 {
    300
}

fn default_property_cache_max_age() -> u64 {
    86400
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            credentials: AppCredentials::default(),
            endpoints: EndpointSettings::default(),
            token_file: default_token_file(),
            cache_dir: default_cache_dir(),
            refresh_margin_secs: default_refresh_margin(),
            property_cache_max_age_secs: default_property_cache_max_age(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(file: &File) -> Result<Self, ClientError> {
        file.read_json()
            .await
            .map_err(|e| ClientError::ConfigError(format!("{}: {}", file.path().display(), e)))
    }

    /// Defaults overridden by the `CONNECTLIFE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(client_id) = lookup("CONNECTLIFE_CLIENT_ID") {
            settings.credentials.client_id = client_id;
        }
        if let Some(secret) = lookup("CONNECTLIFE_CLIENT_SECRET") {
            settings.credentials.client_secret = SecretString::from(secret);
        }
        if let Some(callback) = lookup("CONNECTLIFE_CALLBACK_URL") {
            settings.endpoints.callback_url = callback;
        }
        if let Some(token_file) = lookup("CONNECTLIFE_TOKEN_FILE") {
            settings.token_file = PathBuf::from(token_file);
        }

        let test_env = lookup("CONNECTLIFE_ENV").is_some_and(|env| env == "test");
        let (oauth_default, api_default) = if test_env {
            (TEST_OAUTH_URL, TEST_API_URL)
        } else {
            (PRODUCTION_OAUTH_URL, PRODUCTION_API_URL)
        };
        settings.endpoints.oauth_base_url =
            lookup("CONNECTLIFE_OAUTH_URL").unwrap_or_else(|| oauth_default.to_string());
        settings.endpoints.api_base_url =
            lookup("CONNECTLIFE_API_BASE_URL").unwrap_or_else(|| api_default.to_string());

        if let Some(level) = lookup("LOG_LEVEL").and_then(|l| l.parse().ok()) {
            settings.log_level = level;
        }

        settings
    }

    /// The token file with `~` expanded
    pub fn token_file(&self) -> File {
        File::new(expand_home(&self.token_file))
    }

    /// The cache directory with `~` expanded
    pub fn cache_dir(&self) -> PathBuf {
        expand_home(&self.cache_dir)
    }

    pub fn refresh_margin(&self) -> Duration {
        Duration::from_secs(self.refresh_margin_secs)
    }

    pub fn property_cache_max_age(&self) -> Duration {
        Duration::from_secs(self.property_cache_max_age_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Application id and secret used for OAuth2 grants and request signing
#[derive(Debug, Clone, Deserialize)]
pub struct AppCredentials {
    #[serde(default = "default_client_id")]
    pub client_id: String,

    #[serde(default = "default_client_secret")]
    pub client_secret: SecretString,
}

fn default_client_id() -> String {
    "9793620883275788".to_string()
}

fn default_client_secret() -> SecretString {
    SecretString::from(
        "7h1m3gZVlILyBvIFBNmzXwoFYLhkGqG9NQd2jBzuZCqJKCTyCtYwQtXi4tVBjg9B".to_string(),
    )
}

impl AppCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
        }
    }
}

impl Default for AppCredentials {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            client_secret: default_client_secret(),
        }
    }
}

/// Vendor endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointSettings {
    /// Base URL of the device API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the OAuth2 server
    #[serde(default = "default_oauth_base_url")]
    pub oauth_base_url: String,

    /// Pre-registered redirect URI
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

fn default_api_base_url() -> String {
    PRODUCTION_API_URL.to_string()
}

fn default_oauth_base_url() -> String {
    PRODUCTION_OAUTH_URL.to_string()
}

fn default_callback_url() -> String {
    "http://homeassistant.local:8123/auth/external/callback".to_string()
}

impl EndpointSettings {
    /// Browser authorization endpoint
    pub fn authorize_url(&self) -> String {
        format!("{}/login", self.oauth_base_url.trim_end_matches('/'))
    }

    /// Token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.oauth_base_url.trim_end_matches('/'))
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            oauth_base_url: default_oauth_base_url(),
            callback_url: default_callback_url(),
        }
    }
}
