//! Remote configuration: sources, snapshots, and the process-wide store.
//!
//! Defines the [`ConfigSource`] trait for pluggable key/value backends,
//! the [`ConfigResolver`] for primary/fallback source resolution, and
//! the [`ConfigVersion`] enum for change detection. Submodules provide the
//! immutable [`RemoteConfigSnapshot`](snapshot::RemoteConfigSnapshot), the
//! atomically swapped [`ConfigStore`](store::ConfigStore), validation
//! reports, and concrete source implementations.

pub mod snapshot;
pub mod sources;
pub mod store;
pub mod validation;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::ResolverError;

/// Raw key/value pairs as delivered by a source.
pub type RemoteValues = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigVersion {
    /// In-app defaults, never fetched.
    Defaults,
    Hash(String),
}

impl ConfigVersion {
    /// Short form for logs and health output.
    #[must_use]
    pub fn short(&self) -> &str {
        match self {
            Self::Defaults => "defaults",
            Self::Hash(h) => h.get(..8).unwrap_or(h),
        }
    }
}

// async_trait is required here because ConfigSource is used as Box<dyn ConfigSource>
// and native async fn in traits (Rust 1.75+) does not support dyn dispatch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn load(&self) -> Result<(RemoteValues, ConfigVersion), ResolverError>;
    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ResolverError>;
}

pub struct ConfigResolver {
    primary: Box<dyn ConfigSource>,
    fallback: Option<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    #[must_use]
    pub fn new(primary: Box<dyn ConfigSource>, fallback: Option<Box<dyn ConfigSource>>) -> Self {
        Self { primary, fallback }
    }

    /// Load from the primary source, or from the fallback when the primary fails.
    ///
    /// Returns the name of the source that answered alongside the values.
    pub async fn load_with_fallback(
        &self,
    ) -> Result<(RemoteValues, ConfigVersion, &'static str), ResolverError> {
        match self.primary.load().await {
            Ok((values, version)) => Ok((values, version, self.primary.name())),
            Err(primary_err) => {
                if let Some(ref fallback) = self.fallback {
                    tracing::warn!(
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        error = %primary_err,
                        "primary config source failed, using fallback"
                    );
                    let (values, version) = fallback.load().await?;
                    Ok((values, version, fallback.name()))
                } else {
                    Err(primary_err)
                }
            }
        }
    }

    #[must_use]
    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    #[must_use]
    pub fn primary(&self) -> &dyn ConfigSource {
        &*self.primary
    }
}
