//! Token file management

use tracing::{debug, warn};

use crate::authn::token::TokenRecord;
use crate::errors::ClientError;
use crate::filesys::file::File;

/// Durable storage of the OAuth2 token record.
///
/// Writes go through a temporary file that is renamed over the target, and
/// the file is only readable by its owner.
#[derive(Debug, Clone)]
pub struct TokenStore {
    file: File,
}

impl TokenStore {
    /// Create a store backed by `file`
    pub fn new(file: File) -> Self {
        Self { file }
    }

    /// Get the backing file
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Load the stored record.
    ///
    /// A missing file yields `None`; an unreadable or corrupt file is logged
    /// and also yields `None` so the caller re-authenticates.
    pub async fn load(&self) -> Result<Option<TokenRecord>, ClientError> {
        if !self.file.exists().await {
            return Ok(None);
        }

        match self.file.read_json::<TokenRecord>().await {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(
                    "Failed to load tokens from {}: {}",
                    self.file.path().display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Persist the record
    pub async fn save(&self, record: &TokenRecord) -> Result<(), ClientError> {
        self.file
            .write_json_private(record)
            .await
            .map_err(|e| ClientError::StorageError(format!("Failed to save tokens: {}", e)))?;
        debug!("Tokens saved to {}", self.file.path().display());
        Ok(())
    }

    /// Delete the stored record
    pub async fn clear(&self) -> Result<(), ClientError> {
        self.file
            .delete()
            .await
            .map_err(|e| ClientError::StorageError(format!("Failed to clear tokens: {}", e)))?;
        debug!("Tokens cleared");
        Ok(())
    }
}
