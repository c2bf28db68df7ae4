//! Persistence adapter mirroring the user collection into a blob store.
//!
//! The whole collection lives under a single key as a JSON array. Loading never
//! fails: a missing or unreadable blob yields the seed users instead.

pub mod blob;
pub mod seed;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::core::config::DEFAULT_STORAGE_KEY;
use crate::core::models::UserRecord;
use crate::errors::StoreError;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, is_safe_key};
pub use seed::seed_users;

pub struct PersistenceAdapter {
    blob: Option<Box<dyn BlobStore>>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(blob: impl BlobStore + 'static, key: impl Into<String>) -> Self {
        Self {
            blob: Some(Box::new(blob)),
            key: key.into(),
        }
    }

    /// Adapter over the default `users` key.
    pub fn with_default_key(blob: impl BlobStore + 'static) -> Self {
        Self::new(blob, DEFAULT_STORAGE_KEY)
    }

    /// Adapter for an environment without any blob store: loads the seed, saves nothing.
    pub fn detached() -> Self {
        Self {
            blob: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_detached(&self) -> bool {
        self.blob.is_none()
    }

    pub fn blob(&self) -> Option<&dyn BlobStore> {
        self.blob.as_deref()
    }

    /// Reads the persisted collection, falling back to the seed users.
    pub fn load(&self) -> Vec<UserRecord> {
        let Some(blob) = self.blob.as_deref() else {
            debug!("No blob store available, using seed users");
            return seed_users(Utc::now());
        };

        let raw = match blob.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(key = %self.key, "No saved users found, using seed users");
                return seed_users(Utc::now());
            }
            Err(e) => {
                warn!(key = %self.key, "Failed to read saved users, using seed users: {}", e);
                return seed_users(Utc::now());
            }
        };

        match serde_json::from_str::<Vec<UserRecord>>(&raw) {
            Ok(records) => {
                info!(key = %self.key, count = records.len(), "Loaded saved users");
                records
            }
            Err(e) => {
                #[cfg(feature = "debug-logs")]
                error!(key = %self.key, raw = %raw, "Failed to parse saved users: {}", e);
                #[cfg(not(feature = "debug-logs"))]
                error!(key = %self.key, "Failed to parse saved users: {}", e);
                seed_users(Utc::now())
            }
        }
    }

    /// Serializes the full collection and overwrites the blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the blob store rejects the write.
    pub fn save(&mut self, records: &[UserRecord]) -> Result<(), StoreError> {
        let Some(blob) = self.blob.as_deref_mut() else {
            return Ok(());
        };

        let value = serde_json::to_string(records)?;
        blob.set(&self.key, &value).inspect_err(|e| {
            error!(key = %self.key, "Failed to save users: {}", e);
        })?;
        debug!(key = %self.key, count = records.len(), "Saved users");
        Ok(())
    }
}
