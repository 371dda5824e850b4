//! Redis-backed config source with SHA256 change detection.
//!
//! [`RedisSource`] implements [`ConfigSource`] by reading a Redis hash
//! stored under `genai:{namespace}:config`, one field per remote key. It
//! reads the hash asynchronously via a multiplexed Tokio connection and
//! computes a SHA256 hash of the values for version tracking.

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::Mutex;

use super::values_version;
use crate::config::{ConfigSource, ConfigVersion, RemoteValues};
use crate::error::ResolverError;

pub struct RedisSource {
    connection: Mutex<redis::aio::MultiplexedConnection>,
    key: String,
}

impl RedisSource {
    pub async fn new(url: &str, namespace: &str) -> Result<Self, ResolverError> {
        let client = redis::Client::open(url).map_err(|e| ResolverError::Database {
            backend: "redis",
            source: Box::new(e),
        })?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ResolverError::Database {
                backend: "redis",
                source: Box::new(e),
            })?;

        Ok(Self {
            connection: Mutex::new(connection),
            key: format!("genai:{namespace}:config"),
        })
    }

    #[allow(clippy::significant_drop_tightening)]
    async fn read_values(&self) -> Result<RemoteValues, ResolverError> {
        let mut conn = self.connection.lock().await;

        let values: RemoteValues =
            conn.hgetall(&self.key)
                .await
                .map_err(|e| ResolverError::Database {
                    backend: "redis",
                    source: Box::new(e),
                })?;

        if values.is_empty() {
            return Err(ResolverError::ConfigParse {
                path: self.key.clone(),
                source: format!("hash '{}' not found or empty in Redis", self.key).into(),
            });
        }
        Ok(values)
    }
}

#[async_trait]
impl ConfigSource for RedisSource {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn load(&self) -> Result<(RemoteValues, ConfigVersion), ResolverError> {
        let values = self.read_values().await?;
        let version = values_version(&values);
        Ok((values, version))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ResolverError> {
        let values = self.read_values().await?;
        Ok(*current != values_version(&values))
    }
}
