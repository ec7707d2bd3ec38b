//! OAuth2 grants against the vendor token endpoint

use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::{debug, error};
use url::Url;

use crate::errors::ClientError;
use crate::storage::settings::{AppCredentials, EndpointSettings};

/// Client for the OAuth2 authorize and token endpoints
pub struct OAuthClient {
    client: Client,
    credentials: AppCredentials,
    authorize_url: String,
    token_url: String,
    redirect_uri: String,
}

impl OAuthClient {
    /// Create a new OAuth client
    pub fn new(
        client: Client,
        credentials: AppCredentials,
        endpoints: &EndpointSettings,
    ) -> Self {
        Self {
            client,
            credentials,
            authorize_url: endpoints.authorize_url(),
            token_url: endpoints.token_url(),
            redirect_uri: endpoints.callback_url.clone(),
        }
    }

    /// URL the user opens in a browser to start the authorization-code flow
    pub fn authorize_url(&self) -> Result<String, ClientError> {
        let url = Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "all"),
            ],
        )?;
        Ok(url.to_string())
    }

    /// `authorization_code` grant
    pub async fn authorization_code(&self, code: &str) -> Result<Map<String, Value>, ClientError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    /// `refresh_token` grant
    pub async fn refresh(&self, refresh_token: &str) -> Result<Map<String, Value>, ClientError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    /// `password` grant
    pub async fn password(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Map<String, Value>, ClientError> {
        self.token_request(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password.expose_secret()),
            ("scope", "all"),
        ])
        .await
    }

    /// Post a form-encoded grant and validate the response.
    ///
    /// The response is rejected when it carries an OAuth `error`, a non-zero
    /// `resultCode`, a status other than 200, or no `access_token`.
    async fn token_request(&self, grant: &[(&str, &str)]) -> Result<Map<String, Value>, ClientError> {
        debug!("POST {} ({})", self.token_url, grant[0].1);

        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.expose_secret()),
        ];
        form.extend_from_slice(grant);

        let response = self
            .client
            .post(&self.token_url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        check_grant_response(status, &body)
    }
}

fn check_grant_response(status: StatusCode, body: &str) -> Result<Map<String, Value>, ClientError> {
    let parsed: Option<Map<String, Value>> = serde_json::from_str(body).ok();

    if let Some(response) = &parsed {
        if response.contains_key("error") || result_code(response) != 0 {
            let error = response
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            let description = response
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or("No details provided");
            error!("Token request rejected: {} - {}", error, description);
            return Err(ClientError::AuthenticationFailed(format!(
                "{} - {}",
                error, description
            )));
        }
    }

    if status != StatusCode::OK {
        error!("Token request failed: {}", status);
        return Err(ClientError::AuthenticationFailed(format!(
            "Token request failed: {} - {}",
            status, body
        )));
    }

    let response = parsed.ok_or_else(|| {
        ClientError::AuthenticationFailed("Invalid response: body is not a JSON object".to_string())
    })?;

    if !response.contains_key("access_token") {
        return Err(ClientError::AuthenticationFailed(
            "Invalid response: access_token not found".to_string(),
        ));
    }

    Ok(response)
}

fn result_code(response: &Map<String, Value>) -> i64 {
    match response.get("resultCode") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(-1),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(-1),
        _ => 0,
    }
}

/// Extract the `code` query parameter from the redirect URL the browser
/// landed on after login
pub fn extract_authorization_code(callback_url: &str) -> Result<String, ClientError> {
    let url = Url::parse(callback_url.trim()).map_err(|e| {
        ClientError::AuthenticationFailed(format!("Invalid callback URL: {}", e))
    })?;
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            ClientError::AuthenticationFailed("No authorization code found in URL".to_string())
        })
}
