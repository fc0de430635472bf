//! Redis-compatible remote tier.
//!
//! The snapshot is stored as a plain string value under a single key.
//!
//! | Key         | Type | Description             |
//! |-------------|------|-------------------------|
//! | `{key}`     | JSON | Latest pet snapshot     |

use fred::prelude::*;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::port::PetStore;

/// Snapshot stored on a Redis-compatible server.
///
/// Wraps a [`fred::prelude::Client`]. Cloning shares the connection.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    key: String,
}

impl RedisStore {
    /// Connect to the server at `url` and store the snapshot under `key`.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Remote`] if the connection fails.
    pub async fn connect(url: &str, key: &str) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("invalid remote URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        info!(key, "Connected to remote store");
        Ok(Self {
            client,
            key: key.to_owned(),
        })
    }

    /// Close the connection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Remote`] if the server rejects the quit.
    pub async fn disconnect(&self) -> Result<(), StoreError> {
        self.client.quit().await?;
        Ok(())
    }
}

impl PetStore for RedisStore {
    fn tier(&self) -> &'static str {
        "remote"
    }

    async fn save(&self, json: &str) -> Result<(), StoreError> {
        let _: () = self
            .client
            .set(self.key.as_str(), json, None, None, false)
            .await?;
        debug!(key = %self.key, bytes = json.len(), "Snapshot written");
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.get(self.key.as_str()).await?;
        Ok(value)
    }
}
