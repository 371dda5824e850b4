//! In-memory config source.
//!
//! [`MemorySource`] is a cloneable handle: every clone shares the same
//! values, so a caller can keep one handle to publish changes while the
//! store owns another. `set_unavailable` simulates an unreachable backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::values_version;
use crate::config::{ConfigSource, ConfigVersion, RemoteValues};
use crate::error::ResolverError;

#[derive(Debug, Default)]
struct State {
    values: RemoteValues,
    unavailable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    state: Arc<Mutex<State>>,
}

impl MemorySource {
    #[must_use]
    pub fn new(values: RemoteValues) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                values,
                unavailable: false,
            })),
        }
    }

    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state().values.insert(key.into(), value.into());
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    fn read(&self) -> Result<RemoteValues, ResolverError> {
        let state = self.state();
        if state.unavailable {
            return Err(ResolverError::Io(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "memory source marked unavailable",
            )));
        }
        Ok(state.values.clone())
    }
}

#[async_trait]
impl ConfigSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<(RemoteValues, ConfigVersion), ResolverError> {
        let values = self.read()?;
        let version = values_version(&values);
        Ok((values, version))
    }

    async fn has_changed(&self, current: &ConfigVersion) -> Result<bool, ResolverError> {
        let values = self.read()?;
        Ok(*current != values_version(&values))
    }
}
