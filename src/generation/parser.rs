//! Parse the raw `generation_config` remote value.
//!
//! Recovery policy:
//! - not JSON, not an object, or a core numeric field missing / non-numeric
//!   → [`MalformedConfig::Unparsable`], whole config replaced by defaults
//! - core numeric field outside its range → [`MalformedConfig::OutOfRange`],
//!   whole config replaced by defaults
//! - `stopSequences` present but not a list of strings →
//!   [`MalformedConfig::InvalidStopSequences`], only that field is replaced
//!   (by an empty list)
//! - `stopSequences` missing or `null` → empty list, no diagnostic
//!
//! Each parse yields at most one diagnostic.

use serde::Deserialize;
use serde_json::Value;

use super::model::GenerationConfig;
use crate::error::MalformedConfig;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    #[serde(default)]
    stop_sequences: Option<Value>,
}

/// Result of parsing, including the diagnostic that was logged (if any).
#[derive(Debug)]
pub struct ParseOutcome {
    pub config: GenerationConfig,
    pub diagnostic: Option<MalformedConfig>,
}

impl ParseOutcome {
    /// Whether the whole config fell back to defaults.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.diagnostic
            .as_ref()
            .is_some_and(MalformedConfig::is_whole_object)
    }
}

/// Parse `raw`, returning defaults on malformed input. Never fails.
#[must_use]
pub fn parse(raw: &str) -> GenerationConfig {
    parse_with_diagnostics(raw).config
}

/// Parse `raw` and report what, if anything, had to be recovered.
///
/// The diagnostic is also emitted as a `tracing` warning.
#[must_use]
pub fn parse_with_diagnostics(raw: &str) -> ParseOutcome {
    let outcome = parse_quiet(raw);
    if let Some(ref diagnostic) = outcome.diagnostic {
        tracing::warn!(
            key = crate::config::snapshot::GENERATION_CONFIG_KEY,
            fallback = outcome.is_fallback(),
            error = %diagnostic,
            "malformed generation config, substituting defaults"
        );
    }
    outcome
}

fn parse_quiet(raw: &str) -> ParseOutcome {
    let parsed: RawGenerationConfig = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => return fallback(MalformedConfig::Unparsable(e)),
    };

    let (stop_sequences, stop_diagnostic) = match stop_sequences(parsed.stop_sequences) {
        Ok(sequences) => (sequences, None),
        Err(diagnostic) => (Vec::new(), Some(diagnostic)),
    };

    match GenerationConfig::new(
        parsed.temperature,
        parsed.top_p,
        parsed.top_k,
        parsed.max_output_tokens,
        stop_sequences,
    ) {
        Ok(config) => ParseOutcome {
            config,
            diagnostic: stop_diagnostic,
        },
        Err(errors) => fallback(MalformedConfig::OutOfRange(errors)),
    }
}

fn fallback(diagnostic: MalformedConfig) -> ParseOutcome {
    ParseOutcome {
        config: GenerationConfig::default(),
        diagnostic: Some(diagnostic),
    }
}

fn stop_sequences(value: Option<Value>) -> Result<Vec<String>, MalformedConfig> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(MalformedConfig::InvalidStopSequences {
                    found: json_kind(&other),
                }),
            })
            .collect(),
        Some(other) => Err(MalformedConfig::InvalidStopSequences {
            found: json_kind(&other),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
