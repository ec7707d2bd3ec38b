//! Token manager for the OAuth2 session

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::authn::oauth::OAuthClient;
use crate::authn::token::TokenRecord;
use crate::errors::ClientError;
use crate::storage::token::TokenStore;

/// Source of the current time, replaceable in tests
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Default refresh margin before expiry
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Token manager trait for testability
#[async_trait]
pub trait TokenManagerExt: Send + Sync {
    /// Make sure a usable access token is held, refreshing it if needed
    async fn ensure_valid(&self) -> Result<(), ClientError>;

    /// Get a usable access token
    async fn access_token(&self) -> Result<String, ClientError>;
}

/// Token manager implementation.
///
/// The record lives behind one async mutex that is held across the
/// expiry check and the refresh grant, so concurrent callers never issue
/// more than one refresh.
pub struct TokenManager {
    oauth: OAuthClient,
    store: TokenStore,
    token: Mutex<Option<TokenRecord>>,
    refresh_margin: Duration,
    clock: Clock,
}

impl TokenManager {
    /// Create a new token manager, loading any persisted record
    pub async fn new(oauth: OAuthClient, store: TokenStore) -> Result<Self, ClientError> {
        Self::with_clock(oauth, store, Arc::new(Utc::now)).await
    }

    /// Create a token manager that reads time from `clock`
    pub async fn with_clock(
        oauth: OAuthClient,
        store: TokenStore,
        clock: Clock,
    ) -> Result<Self, ClientError> {
        let mut loaded = store.load().await?;
        if let Some(record) = loaded.as_mut() {
            record.stamp_expiry(clock());
            debug!("Loaded token record, expires at {:?}", record.expiry());
        }

        Ok(Self {
            oauth,
            store,
            token: Mutex::new(loaded),
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            clock,
        })
    }

    /// Override the refresh margin
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    /// Browser URL for the authorization-code flow
    pub fn authorize_url(&self) -> Result<String, ClientError> {
        self.oauth.authorize_url()
    }

    /// Whether a record with an access token is held
    pub async fn is_authenticated(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.access_token.is_empty())
    }

    /// Snapshot of the current record
    pub async fn current(&self) -> Option<TokenRecord> {
        self.token.lock().await.clone()
    }

    /// Exchange an authorization code for a new record
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<TokenRecord, ClientError> {
        let mut token = self.token.lock().await;
        let response = self.oauth.authorization_code(code).await?;
        let record = TokenRecord::from_grant(response, (self.clock)())?;

        self.store.save(&record).await?;
        *token = Some(record.clone());

        info!("Authorization code exchanged, token expires at {:?}", record.expiry());
        Ok(record)
    }

    /// Obtain a new record with the password grant
    pub async fn login_with_password(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenRecord, ClientError> {
        debug!("Authenticating with password grant for user: {}", username);

        let mut token = self.token.lock().await;
        let record = match self.oauth.password(username, password).await {
            Ok(response) => TokenRecord::from_grant(response, (self.clock)()),
            Err(e) => Err(e),
        };
        let record = record.map_err(|e| {
            error!("Password authentication failed: {}", e);
            ClientError::AuthenticationFailed(format!(
                "Login failed for {}, check the email and password ({})",
                username,
                login_failure_reason(&e)
            ))
        })?;

        self.store.save(&record).await?;
        *token = Some(record.clone());

        info!("Password authentication successful for user: {}", username);
        Ok(record)
    }

    /// Forget the record in memory and on disk
    pub async fn logout(&self) -> Result<(), ClientError> {
        let mut token = self.token.lock().await;
        *token = None;
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// Refresh under the held lock; nothing changes unless the grant succeeds
    async fn refresh_locked(&self, current: &TokenRecord) -> Result<TokenRecord, ClientError> {
        let refresh_token = current
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::TokenExpired("No refresh token available".to_string()))?;

        let response = self
            .oauth
            .refresh(refresh_token)
            .await
            .map_err(|e| ClientError::TokenExpired(format!("Failed to refresh token: {}", e)))?;
        let fresh = TokenRecord::from_grant(response, (self.clock)())
            .map_err(|e| ClientError::TokenExpired(format!("Failed to refresh token: {}", e)))?;

        Ok(current.clone().merged_with(fresh))
    }
}

#[async_trait]
impl TokenManagerExt for TokenManager {
    async fn ensure_valid(&self) -> Result<(), ClientError> {
        self.access_token().await.map(|_| ())
    }

    async fn access_token(&self) -> Result<String, ClientError> {
        let mut token = self.token.lock().await;
        let current = token.as_ref().ok_or_else(|| {
            error!("No token available");
            ClientError::NoCredentials
        })?;

        if !current.needs_refresh((self.clock)(), self.refresh_margin) {
            return Ok(current.access_token.clone());
        }

        info!("Access token expires within {:?}, refreshing...", self.refresh_margin);
        let refreshed = match self.refresh_locked(current).await {
            Ok(record) => record,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&refreshed).await {
            warn!("Refreshed token could not be persisted: {}", e);
        }

        let access_token = refreshed.access_token.clone();
        info!("Token refreshed successfully, expires at {:?}", refreshed.expiry());
        *token = Some(refreshed);
        Ok(access_token)
    }
}

/// Describe a failed password grant without echoing request data
fn login_failure_reason(err: &ClientError) -> &'static str {
    match err {
        ClientError::AuthenticationFailed(_) => "credentials rejected",
        ClientError::TransportError(_) => "token endpoint unreachable",
        _ => "unexpected token response",
    }
}
