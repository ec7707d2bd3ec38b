//! Signed HTTP client for the ConnectLife API

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::Utc;
use reqwest::{header, Client, Method};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tracing::{debug, error};
use url::Url;

use crate::authn::token_mngr::TokenManagerExt;
use crate::errors::ClientError;
use crate::http::envelope::Envelope;
use crate::http::params::{self, SystemParams};
use crate::http::signing::{self, SIGN_HEADER};
use crate::storage::settings::AppCredentials;
use crate::utils::{timestamp_millis, user_agent};

/// Header carrying the bearer token on GET requests
pub const ACCESS_TOKEN_HEADER: &str = "accessToken";

/// HTTP client for the vendor API.
///
/// Every call is signed with the application secret and authorized with the
/// access token handed out by the token manager.
pub struct HttpClient {
    client: Client,
    base_url: String,
    credentials: AppCredentials,
    tokens: Arc<dyn TokenManagerExt>,
    source_id: OnceLock<String>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(
        base_url: &str,
        credentials: AppCredentials,
        tokens: Arc<dyn TokenManagerExt>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            tokens,
            source_id: OnceLock::new(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Source id of this client, generated on first use
    pub fn source_id(&self) -> &str {
        self.source_id
            .get_or_init(|| params::generate_source_id(timestamp_millis()))
    }

    /// Make a signed GET request, `fields` go to the query string
    pub async fn get(
        &self,
        endpoint: &str,
        fields: Map<String, Value>,
    ) -> Result<Envelope, ClientError> {
        self.request(Method::GET, endpoint, Some(fields)).await
    }

    /// Make a signed POST request, `fields` form the JSON body
    pub async fn post(
        &self,
        endpoint: &str,
        fields: Map<String, Value>,
    ) -> Result<Envelope, ClientError> {
        self.request(Method::POST, endpoint, Some(fields)).await
    }

    /// Make a signed request and validate the response envelope
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        fields: Option<Map<String, Value>>,
    ) -> Result<Envelope, ClientError> {
        let access_token = self.tokens.access_token().await?;

        let is_get = method == Method::GET;
        let app_id = self.credentials.client_id.as_str();
        let mut system = SystemParams::new(timestamp_millis(), app_id, self.source_id());
        if is_get {
            system = system.with_access_token(&access_token);
        }

        let mut merged = fields.unwrap_or_default();
        system.merge_into(&mut merged);

        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        let body = if is_get {
            {
                let mut query = url.query_pairs_mut();
                for (key, value) in &merged {
                    query.append_pair(key, &params::query_value(value));
                }
            }
            None
        } else {
            Some(serde_json::to_string(&merged)?)
        };

        let signed = signing::sign(
            app_id,
            self.credentials.client_secret.expose_secret(),
            method.as_str(),
            &url,
            body.as_deref(),
            Utc::now(),
        );

        debug!("{} {}", method, masked_url(&url));
        if let Some(body) = &body {
            debug!("Request body: {}", body);
        }

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(SIGN_HEADER, app_id)
            .header(header::DATE, &signed.date)
            .header(header::AUTHORIZATION, &signed.authorization)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Digest", &signed.digest);
        if is_get {
            request = request.header(ACCESS_TOKEN_HEADER, &access_token);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("HTTP {} {} failed: {}", method, endpoint, e);
            ClientError::TransportError(e)
        })?;

        let status = response.status();
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                error!("HTTP {} {} failed: {}", method, endpoint, status);
                return Err(ClientError::TransportError(e));
            }
        };

        let text = response.text().await?;
        debug!("Response {}: {}", status, text);

        Envelope::parse(&text).inspect_err(|e| {
            error!("{} {} rejected: {}", method, endpoint, e);
        })
    }
}

/// URL for logging, with the access token masked
fn masked_url(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == ACCESS_TOKEN_HEADER { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if !pairs.is_empty() {
        masked.query_pairs_mut().clear().extend_pairs(pairs);
    }
    masked.to_string()
}
