//! Vendor response envelope

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ClientError;

/// A successful vendor response: `{ "resultCode": 0, "msg"?: ..., ...payload }`
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Map<String, Value>,
}

impl Envelope {
    /// Parse and validate a response body.
    ///
    /// Fails with `InvalidResponse` when the body is not a JSON object and with
    /// `ApiError` when `resultCode` is missing or non-zero.
    pub fn parse(text: &str) -> Result<Self, ClientError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ClientError::InvalidResponse(format!("Invalid JSON response: {}", e)))?;

        let body = match value {
            Value::Object(body) => body,
            other => {
                return Err(ClientError::InvalidResponse(format!(
                    "Unexpected response format: {}",
                    other
                )))
            }
        };

        if result_code(&body) != Some(0) {
            let message = body
                .get("msg")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown error");
            return Err(ClientError::api(message));
        }

        Ok(Self { body })
    }

    /// Raw payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Deserialize a payload field, `T::default()` when absent or null
    pub fn field<T>(&self, key: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        match self.body.get(key) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                ClientError::InvalidResponse(format!("Unexpected `{}` payload: {}", key, e))
            }),
        }
    }

    /// The whole body
    pub fn into_inner(self) -> Map<String, Value> {
        self.body
    }
}

fn result_code(body: &Map<String, Value>) -> Option<i64> {
    match body.get("resultCode")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
