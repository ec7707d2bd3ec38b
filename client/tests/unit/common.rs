//! Shared fixtures: settings pointed at a mock server, token files, clocks

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use clife::authn::oauth::OAuthClient;
use clife::authn::token_mngr::{Clock, TokenManager};
use clife::filesys::file::File;
use clife::http::client::HttpClient;
use clife::storage::settings::{AppCredentials, EndpointSettings, Settings};
use clife::storage::token::TokenStore;

pub const APP_ID: &str = "test-app";
pub const APP_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "access-1";

/// Settings with both the API and OAuth hosts served by `server_uri`
pub fn settings(server_uri: &str, dir: &Path) -> Settings {
    Settings {
        credentials: AppCredentials::new(APP_ID, APP_SECRET),
        endpoints: EndpointSettings {
            api_base_url: server_uri.to_string(),
            oauth_base_url: server_uri.to_string(),
            callback_url: "https://example.invalid/callback".to_string(),
        },
        token_file: dir.join("tokens.json"),
        cache_dir: dir.join("cache"),
        ..Settings::default()
    }
}

/// Write a token record valid for another hour of wall-clock time
pub async fn write_valid_token(file: &File) {
    let expires_at = Utc::now().timestamp() as f64 + 3600.0;
    write_token(
        file,
        json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-1",
            "expires_in": 3600,
            "expires_at": expires_at,
        }),
    )
    .await;
}

pub async fn write_token(file: &File, record: Value) {
    file.write_json_private(&record).await.unwrap();
}

/// A clock the test moves by hand, in epoch seconds
#[derive(Clone)]
pub struct ManualClock(Arc<AtomicI64>);

impl ManualClock {
    pub fn at(secs: i64) -> Self {
        Self(Arc::new(AtomicI64::new(secs)))
    }

    pub fn set(&self, secs: i64) {
        self.0.store(secs, Ordering::SeqCst);
    }

    pub fn clock(&self) -> Clock {
        let secs = self.0.clone();
        Arc::new(move || DateTime::from_timestamp(secs.load(Ordering::SeqCst), 0).unwrap())
    }
}

pub fn oauth_client(settings: &Settings) -> OAuthClient {
    OAuthClient::new(
        reqwest::Client::new(),
        settings.credentials.clone(),
        &settings.endpoints,
    )
}

pub async fn token_manager(settings: &Settings, clock: Clock) -> Arc<TokenManager> {
    let store = TokenStore::new(settings.token_file());
    Arc::new(
        TokenManager::with_clock(oauth_client(settings), store, clock)
            .await
            .unwrap(),
    )
}

pub fn http_client(settings: &Settings, tokens: Arc<TokenManager>) -> HttpClient {
    HttpClient::new(
        &settings.endpoints.api_base_url,
        settings.credentials.clone(),
        tokens,
        Duration::from_secs(5),
    )
    .unwrap()
}

pub fn header<'a>(request: &'a wiremock::Request, name: &str) -> &'a str {
    request.headers.get(name).unwrap().to_str().unwrap()
}
