//! Immutable view of one activated set of remote values.

use std::collections::{BTreeMap, BTreeSet};
use std::time::SystemTime;

use super::{ConfigVersion, RemoteValues};

pub const MODEL_NAME_KEY: &str = "model_name";
pub const GENERATION_CONFIG_KEY: &str = "generation_config";

/// Model used when neither the remote source nor the defaults name one.
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";

/// Built-in defaults, used when no defaults file is supplied.
#[must_use]
pub fn builtin_defaults() -> RemoteValues {
    BTreeMap::from([(MODEL_NAME_KEY.to_string(), DEFAULT_MODEL_NAME.to_string())])
}

#[derive(Debug, Clone)]
pub struct RemoteConfigSnapshot {
    values: RemoteValues,
    version: ConfigVersion,
    activation: u64,
    source: String,
    activated_at: SystemTime,
}

impl RemoteConfigSnapshot {
    /// The snapshot a store starts with: defaults only, activation 0.
    #[must_use]
    pub fn from_defaults(defaults: RemoteValues) -> Self {
        Self {
            values: defaults,
            version: ConfigVersion::Defaults,
            activation: 0,
            source: "defaults".into(),
            activated_at: SystemTime::now(),
        }
    }

    /// Fetched values layered over `defaults`, not yet activated.
    #[must_use]
    pub fn fetched(
        defaults: &RemoteValues,
        fetched: RemoteValues,
        version: ConfigVersion,
        source: &str,
    ) -> Self {
        let mut values = defaults.clone();
        values.extend(fetched);
        Self {
            values,
            version,
            activation: 0,
            source: source.into(),
            activated_at: SystemTime::now(),
        }
    }

    /// Stamp this snapshot with its activation marker.
    #[must_use]
    pub(crate) fn activated(mut self, activation: u64) -> Self {
        self.activation = activation;
        self.activated_at = SystemTime::now();
        self
    }

    /// Raw value for `key`, or `""` when the key is unknown.
    #[must_use]
    pub fn get_string(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.get_string(MODEL_NAME_KEY)
    }

    #[must_use]
    pub fn generation_config_raw(&self) -> &str {
        self.get_string(GENERATION_CONFIG_KEY)
    }

    #[must_use]
    pub const fn values(&self) -> &RemoteValues {
        &self.values
    }

    #[must_use]
    pub const fn version(&self) -> &ConfigVersion {
        &self.version
    }

    /// Monotonic activation marker; 0 means in-app defaults.
    #[must_use]
    pub const fn activation(&self) -> u64 {
        self.activation
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn activated_at(&self) -> SystemTime {
        self.activated_at
    }

    /// Keys whose value differs between `self` and `other`, including
    /// keys present in only one of them.
    #[must_use]
    pub fn changed_keys(&self, other: &Self) -> BTreeSet<String> {
        let mut changed: BTreeSet<String> = self
            .values
            .iter()
            .filter(|(k, v)| other.values.get(*k) != Some(*v))
            .map(|(k, _)| k.clone())
            .collect();
        changed.extend(
            other
                .values
                .keys()
                .filter(|k| !self.values.contains_key(*k))
                .cloned(),
        );
        changed
    }
}

impl<K, V> FromIterator<(K, V)> for RemoteConfigSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    /// Builds an unversioned snapshot, handy for tests and one-shot resolution.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_defaults(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
