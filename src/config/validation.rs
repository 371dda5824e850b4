//! Remote value validation with detailed error reporting.
//!
//! Runtime resolution never rejects a snapshot: a malformed
//! `generation_config` falls back to defaults. The [`validate`] function
//! is the strict view used by the `validate` command, reporting everything
//! that would trigger a fallback before it reaches production.

use super::snapshot::{GENERATION_CONFIG_KEY, MODEL_NAME_KEY};
use super::RemoteValues;
use crate::error::{MalformedConfig, ValidationError};
use crate::generation::parser::parse_with_diagnostics;

/// Validate a model identifier. Returns `Ok(())` or a human-readable error.
pub fn validate_model_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("model name cannot be empty".into());
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("'{name}' contains whitespace"));
    }
    Ok(())
}

pub fn validate(values: &RemoteValues) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match values.get(MODEL_NAME_KEY) {
        None => errors.push(ValidationError {
            key: MODEL_NAME_KEY.into(),
            field: "(value)".into(),
            message: "key is missing".into(),
            suggestion: Some(format!(
                "add '{MODEL_NAME_KEY}' or supply it through --defaults"
            )),
        }),
        Some(name) => {
            if let Err(msg) = validate_model_name(name) {
                errors.push(ValidationError {
                    key: MODEL_NAME_KEY.into(),
                    field: "(value)".into(),
                    message: msg,
                    suggestion: (!name.trim().is_empty() && name.trim() != name)
                        .then(|| format!("did you mean '{}'?", name.trim())),
                });
            }
        }
    }

    if let Some(raw) = values.get(GENERATION_CONFIG_KEY) {
        match parse_with_diagnostics(raw).diagnostic {
            None => {}
            Some(MalformedConfig::OutOfRange(range_errors)) => errors.extend(range_errors),
            Some(MalformedConfig::InvalidStopSequences { found }) => {
                errors.push(ValidationError {
                    key: GENERATION_CONFIG_KEY.into(),
                    field: "stopSequences".into(),
                    message: format!("expected an array of strings, found {found}"),
                    suggestion: Some("e.g. \"stopSequences\": [\"END\"]".into()),
                });
            }
            Some(other) => errors.push(ValidationError {
                key: GENERATION_CONFIG_KEY.into(),
                field: "(value)".into(),
                message: other.to_string(),
                suggestion: Some(
                    "required: temperature, topP, topK, maxOutputTokens".into(),
                ),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Findings that are not errors but still surface at runtime.
#[must_use]
pub fn warnings(values: &RemoteValues) -> Vec<String> {
    let mut warnings = Vec::new();
    if !values.contains_key(GENERATION_CONFIG_KEY) {
        warnings.push(format!(
            "{GENERATION_CONFIG_KEY} is unset: tuned clients use library defaults \
             and log a malformed-config warning on every construction"
        ));
    }
    warnings
}

#[must_use]
pub fn format_validation_report(path: &str, values: &RemoteValues) -> String {
    let model = values.get(MODEL_NAME_KEY).map_or("(unset)", String::as_str);
    let mut lines = vec![format!("  {} keys\n", values.len())];
    lines.push(format!("  model_name:        {model}"));

    match values.get(GENERATION_CONFIG_KEY) {
        None => lines.push(
            "  generation_config: (unset, library defaults, warns on each client)".into(),
        ),
        Some(raw) => {
            let config = parse_with_diagnostics(raw).config;
            lines.push(format!(
                "  generation_config: temperature={} topP={} topK={} maxOutputTokens={}",
                config.temperature(),
                config.top_p(),
                config.top_k(),
                config.max_output_tokens(),
            ));
            if !config.stop_sequences().is_empty() {
                lines.push(format!(
                    "    stopSequences: {}",
                    config.stop_sequences().join(", ")
                ));
            }
        }
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
