//! Generic async file-based config source with SHA256 change detection.
//!
//! [`FileSource`] implements [`ConfigSource`] for any flat key/value file
//! format by accepting a deserialization function at construction time. It
//! reads the file asynchronously via Tokio and versions the decoded values
//! with [`values_version`], so a file and a remote source holding the same
//! values report the same version.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{flatten_values, values_version, RawDocument};
use crate::config::{ConfigSource, ConfigVersion, RemoteValues};
use crate::error::ResolverError;

pub type Deserializer = fn(&str) -> Result<RawDocument, Box<dyn std::error::Error + Send + Sync>>;

pub struct FileSource {
    path: PathBuf,
    name: &'static str,
    deserialize: Deserializer,
}

impl FileSource {
    #[must_use]
    pub fn new(path: PathBuf, name: &'static str, deserialize: Deserializer) -> Self {
        Self {
            path,
            name,
            deserialize,
        }
    }

    async fn read_values(&self) -> Result<RemoteValues, ResolverError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResolverError::ConfigFileNotFound {
                    path: self.path.clone(),
                }
            } else {
                ResolverError::Io(e)
            }
        })?;

        let document = (self.deserialize)(&content).map_err(|e| ResolverError::ConfigParse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Ok(flatten_values(document))
    }
}

#[async_trait]
impl ConfigSource for FileSource {
    fn name(&self) -> &'static str {
        self.name
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
