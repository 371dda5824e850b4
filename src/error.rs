//! Unified error types for genai-resolver.
//!
//! Defines [`ResolverError`] (the main crate error enum),
//! [`MalformedConfig`] for generation-config diagnostics, and
//! [`ValidationError`] for per-field reports. All use `thiserror` for
//! `Display` and `Error` derives. Error messages include contextual hints
//! to guide the user toward a fix.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub key: String,
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  {}: {} — {}", self.key, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    use std::fmt::Write;
    let mut buf = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        // write! to String is infallible (only fails on OOM which is unrecoverable)
        let _ = write!(buf, "{e}");
    }
    buf
}

/// Why a `generation_config` value could not be used as-is.
///
/// Never returned as an error to callers of the parser: it is attached to
/// the parse outcome and logged, while defaults (or an empty stop list)
/// are substituted.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MalformedConfig {
    #[error("generation config could not be parsed: {0}")]
    Unparsable(#[from] serde_json::Error),

    #[error("generation config out of range:\n{}", format_errors(.0))]
    OutOfRange(Vec<ValidationError>),

    #[error("stopSequences must be an array of strings, found {found}")]
    InvalidStopSequences { found: &'static str },
}

impl MalformedConfig {
    /// Whether the whole config was replaced by defaults.
    #[must_use]
    pub const fn is_whole_object(&self) -> bool {
        !matches!(self, Self::InvalidStopSequences { .. })
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolverError {
    #[error("No config source found.\n\n  {hint}")]
    NoConfigSource { hint: String },

    #[error("Config file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Config parse error in {path}:\n  {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config validation failed:\n{}", format_errors(.errors))]
    ConfigValidation { errors: Vec<ValidationError> },

    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error(
        "Unsupported client kind: '{kind}' \
         (expected one of: summarize, photo_reasoning, chat, functions_chat)"
    )]
    UnsupportedClientKind { kind: String },

    #[error("Config fetch from {source_name} failed: {source}")]
    ConfigFetch {
        source_name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Config update from {source_name} failed: {source}")]
    ConfigUpdate {
        source_name: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unknown function '{name}' for model {model}")]
    UnknownFunction { name: String, model: String },

    #[error("Invalid arguments for function '{name}': {message}")]
    InvalidFunctionArgs { name: String, message: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Remote config request returned status {0}")]
    RemoteStatus(hyper::StatusCode),

    #[error("File already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),

    #[cfg(feature = "redis")]
    #[error("Database error ({backend}): {source}")]
    Database {
        backend: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
