use async_trait::async_trait;
use learningstack_core::model::{Session, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON user record.
pub const USER_KEY: &str = "user";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String key/value store that outlives a single page, the client's
/// counterpart of browser local storage.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ClientStorage for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Client storage behind a trait object, plus the session helpers built on
/// the `token` and `user` keys.
#[derive(Clone)]
pub struct Storage {
    pub client: Arc<dyn ClientStorage>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let client: Arc<dyn ClientStorage> = Arc::new(InMemoryRepository::new());
        Self { client }
    }

    /// Stored bearer token, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        self.client.get(TOKEN_KEY).await
    }

    /// Stored user record. A record that does not parse is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn user(&self) -> Result<Option<User>, StorageError> {
        let Some(raw) = self.client.get(USER_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable stored user record");
                Ok(None)
            }
        }
    }

    /// Replace the stored user record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be encoded or stored.
    pub async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.client.set(USER_KEY, &raw).await
    }

    /// Persist token and user after a login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either entry cannot be stored.
    pub async fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        self.client.set(TOKEN_KEY, &session.token).await?;
        self.save_user(&session.user).await
    }

    /// Both halves of the session, when both are present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn session(&self) -> Result<Option<Session>, StorageError> {
        let token = self.token().await?;
        let user = self.user().await?;
        Ok(token.zip(user).map(|(token, user)| Session { token, user }))
    }

    /// Remove token and user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if either entry cannot be removed.
    pub async fn clear_session(&self) -> Result<(), StorageError> {
        self.client.remove(TOKEN_KEY).await?;
        self.client.remove(USER_KEY).await
    }
}
