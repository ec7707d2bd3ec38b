//! OAuth2 token record

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ClientError;

/// The token record returned by a grant and persisted between sessions.
///
/// Fields other than the four below are kept in `extra` so that the file
/// written back contains everything the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Opaque access token
    pub access_token: String,

    /// Opaque refresh token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds as reported by the grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Absolute expiry, Unix epoch seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenRecord {
    /// Build a record from a grant response received at `received_at`
    pub fn from_grant(
        response: Map<String, Value>,
        received_at: DateTime<Utc>,
    ) -> Result<Self, ClientError> {
        let mut record: TokenRecord = serde_json::from_value(Value::Object(response))
            .map_err(|e| {
                ClientError::AuthenticationFailed(format!("Invalid token response: {}", e))
            })?;
        if record.access_token.is_empty() {
            return Err(ClientError::AuthenticationFailed(
                "Invalid response: access_token not found".to_string(),
            ));
        }
        record.stamp_expiry(received_at);
        Ok(record)
    }

    /// Derive `expires_at` from `expires_in` when only the lifetime is known
    pub fn stamp_expiry(&mut self, at: DateTime<Utc>) {
        if self.expires_at.is_none() {
            if let Some(expires_in) = self.expires_in.filter(|e| *e > 0) {
                self.expires_at = Some(epoch_secs(at) + expires_in as f64);
            }
        }
    }

    /// Absolute expiry, if known
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        let at = self.expires_at?;
        DateTime::from_timestamp_millis((at * 1000.0) as i64)
    }

    /// Whether the token must be refreshed before use at `now`.
    ///
    /// A record without expiry information is treated as expired.
    pub fn needs_refresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at {
            Some(at) => epoch_secs(now) >= at - margin.as_secs_f64(),
            None => true,
        }
    }

    /// Apply a refresh response on top of this record.
    ///
    /// Fields present in `fresh` win; a missing refresh token or expiry keeps
    /// the current one.
    pub fn merged_with(mut self, fresh: TokenRecord) -> TokenRecord {
        self.access_token = fresh.access_token;
        if fresh.refresh_token.is_some() {
            self.refresh_token = fresh.refresh_token;
        }
        if fresh.expires_in.is_some() {
            self.expires_in = fresh.expires_in;
        }
        if fresh.expires_at.is_some() {
            self.expires_at = fresh.expires_at;
        }
        self.extra.extend(fresh.extra);
        self
    }
}

fn epoch_secs(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}
