//! The [`GenerationConfig`] value object.
//!
//! Fields are private and only reachable through a validating constructor,
//! so every instance in circulation is within range. Serialized field names
//! follow the remote JSON encoding (`topP`, `maxOutputTokens`, ...).

use serde::Serialize;

use crate::error::ValidationError;

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);
pub const TOP_P_RANGE: (f32, f32) = (0.0, 1.0);

const DEFAULT_TEMPERATURE: f32 = 1.0;
const DEFAULT_TOP_P: f32 = 0.95;
const DEFAULT_TOP_K: u32 = 40;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Sampling parameters for a generative model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            stop_sequences: Vec::new(),
        }
    }
}

impl GenerationConfig {
    /// Build a config, collecting every out-of-range field.
    pub fn new(
        temperature: f32,
        top_p: f32,
        top_k: u32,
        max_output_tokens: u32,
        stop_sequences: Vec<String>,
    ) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();

        check_unit_range(&mut errors, "temperature", temperature, TEMPERATURE_RANGE);
        check_unit_range(&mut errors, "topP", top_p, TOP_P_RANGE);
        check_positive(&mut errors, "topK", top_k);
        check_positive(&mut errors, "maxOutputTokens", max_output_tokens);

        if errors.is_empty() {
            Ok(Self {
                temperature,
                top_p,
                top_k,
                max_output_tokens,
                stop_sequences,
            })
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub const fn top_p(&self) -> f32 {
        self.top_p
    }

    #[must_use]
    pub const fn top_k(&self) -> u32 {
        self.top_k
    }

    #[must_use]
    pub const fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    #[must_use]
    pub fn stop_sequences(&self) -> &[String] {
        &self.stop_sequences
    }

    /// Whether this equals the library defaults.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn check_unit_range(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: f32,
    (min, max): (f32, f32),
) {
    if !value.is_finite() || value < min || value > max {
        errors.push(ValidationError {
            key: crate::config::snapshot::GENERATION_CONFIG_KEY.into(),
            field: field.into(),
            message: format!("{value} is outside {min}..={max}"),
            suggestion: Some(format!("use a value between {min} and {max}")),
        });
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &str, value: u32) {
    if value == 0 {
        errors.push(ValidationError {
            key: crate::config::snapshot::GENERATION_CONFIG_KEY.into(),
            field: field.into(),
            message: "must be a positive integer".into(),
            suggestion: None,
        });
    }
}
