//! Source and defaults resolution shared by `run` and `resolve`.
//!
//! A remote backend (Redis, then HTTP) becomes the primary source when
//! configured, with a local file as its fallback. Without a remote backend
//! the file is the primary. Files are auto-detected in the working
//! directory when `--config` is not given.

use std::path::{Path, PathBuf};

use crate::cli::SourceArgs;
use crate::config::snapshot::builtin_defaults;
use crate::config::sources::{self, http_source::HttpSource};
use crate::config::store::ConfigStore;
use crate::config::{ConfigResolver, ConfigSource, RemoteValues};
use crate::error::ResolverError;

const CANDIDATES: [&str; 4] = [
    "remote-config.yaml",
    "remote-config.yml",
    "remote-config.json",
    "remote-config.toml",
];

/// Build a store from `args`, with the defaults snapshot active.
pub async fn build_store(args: &SourceArgs) -> Result<ConfigStore, ResolverError> {
    let resolver = resolve_config_sources(args).await?;
    let defaults = load_defaults(args.defaults.as_deref()).await?;
    Ok(ConfigStore::new(resolver, defaults))
}

pub async fn resolve_config_sources(args: &SourceArgs) -> Result<ConfigResolver, ResolverError> {
    let mut primary: Option<Box<dyn ConfigSource>> = None;

    #[cfg(feature = "redis")]
    if let Some(ref url) = args.redis_url {
        let source = sources::redis_source::RedisSource::new(url, &args.namespace).await?;
        primary = Some(Box::new(source));
    }

    if primary.is_none() {
        if let Some(ref url) = args.remote_url {
            primary = Some(Box::new(HttpSource::new(url)?));
        }
    }

    let file_source = resolve_file_source(args.config.as_deref()).await?;

    match (primary, file_source) {
        (Some(remote), fallback) => Ok(ConfigResolver::new(remote, fallback)),
        (None, Some(file)) => Ok(ConfigResolver::new(file, None)),
        (None, None) => Err(ResolverError::NoConfigSource {
            hint: "Provide --config <file>, --remote-url <url> or a Redis backend.\n  \
                   Run 'genai-resolver init' to create a remote config file."
                .into(),
        }),
    }
}

async fn resolve_file_source(
    explicit: Option<&Path>,
) -> Result<Option<Box<dyn ConfigSource>>, ResolverError> {
    if let Some(path) = explicit {
        return create_file_source(path).map(Some);
    }

    for name in &CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected remote config file");
            return create_file_source(&path).map(Some);
        }
    }

    Ok(None)
}

pub fn create_file_source(path: &Path) -> Result<Box<dyn ConfigSource>, ResolverError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Ok(Box::new(sources::yaml::new(path.to_path_buf()))),

        #[cfg(feature = "json")]
        "json" => Ok(Box::new(sources::json::new(path.to_path_buf()))),

        #[cfg(feature = "toml")]
        "toml" => Ok(Box::new(sources::toml_source::new(path.to_path_buf()))),

        other => Err(ResolverError::UnsupportedFormat(other.to_string())),
    }
}

/// Built-in defaults, overlaid with the entries of `path` when given.
pub async fn load_defaults(path: Option<&Path>) -> Result<RemoteValues, ResolverError> {
    let mut defaults = builtin_defaults();
    let Some(path) = path else {
        return Ok(defaults);
    };

    let values = read_values(path).await?;
    tracing::debug!(path = %path.display(), keys = values.len(), "loaded in-app defaults");
    defaults.extend(values);
    Ok(defaults)
}

/// Read a flat key/value file, reporting a missing file by path.
pub async fn read_values(path: &Path) -> Result<RemoteValues, ResolverError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ResolverError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ResolverError::Io(e)
        }
    })?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    sources::parse_values_str(ext, &content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builtin_defaults_without_file() {
        let defaults = load_defaults(None).await.unwrap();
        assert_eq!(defaults, builtin_defaults());
    }

    #[tokio::test]
    async fn missing_defaults_file_is_reported_by_path() {
        let err = load_defaults(Some(Path::new("does-not-exist.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolverError::ConfigFileNotFound { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = create_file_source(Path::new("config.ini")).err().unwrap();
        assert!(matches!(err, ResolverError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[tokio::test]
    async fn remote_url_becomes_primary() {
        let args = SourceArgs {
            config: None,
            remote_url: Some("https://config.example.com/app.json".into()),
            #[cfg(feature = "redis")]
            redis_url: None,
            namespace: "default".into(),
            defaults: None,
        };
        let resolver = resolve_config_sources(&args).await.unwrap();
        assert_eq!(resolver.primary_name(), "http");
    }
}
