//! Concrete [`ConfigSource`](super::ConfigSource) implementations.
//!
//! Provides file-based sources (YAML, JSON, TOML) gated by feature flags,
//! an HTTP source for remote JSON documents, an optional Redis hash source,
//! an in-memory source, and the [`parse_values_str`] helper that turns a
//! flat document into [`RemoteValues`].

pub mod file_source;
pub mod http_source;
pub mod memory;

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "toml")]
pub mod toml_source;

#[cfg(feature = "redis")]
pub mod redis_source;

use std::collections::BTreeMap;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::{ConfigVersion, RemoteValues};
use crate::error::ResolverError;

/// A flat document before its values are reduced to strings.
pub type RawDocument = BTreeMap<String, Value>;

/// Parse a flat key/value document based on file extension.
pub fn parse_values_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<RemoteValues, ResolverError> {
    let document: RawDocument = match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| ResolverError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        })?,

        "json" => serde_json::from_str(content).map_err(|e| ResolverError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        })?,

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| ResolverError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        })?,

        other => return Err(ResolverError::UnsupportedFormat(other.to_string())),
    };

    Ok(flatten_values(document))
}

/// Reduce every value to the string a remote config service would hand out.
///
/// Strings pass through verbatim, `null` entries are dropped, and anything
/// else (numbers, booleans, nested tables) is re-encoded as compact JSON.
#[must_use]
pub fn flatten_values(document: RawDocument) -> RemoteValues {
    document
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

/// Content version of a set of values, independent of how they were encoded.
#[must_use]
pub fn values_version(values: &RemoteValues) -> ConfigVersion {
    let mut hasher = Sha256::new();
    for (key, value) in values {
        hasher.update(key.as_bytes());
        hasher.update([0]);
        hasher.update(value.as_bytes());
        hasher.update([0]);
    }
    ConfigVersion::Hash(format!("{:x}", hasher.finalize()))
}
