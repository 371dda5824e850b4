//! `genai-resolver init`: generate a starter remote config file.
//!
//! Writes a YAML, JSON, or TOML file. The minimal template holds only
//! `model_name`; `--full` adds `generation_config` with every tuning
//! field documented.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::ResolverError;

pub fn execute(args: &InitArgs) -> Result<(), ResolverError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("remote-config.{}", args.format.extension())));

    if output.exists() {
        return Err(ResolverError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# genai-resolver remote config
#
# Without generation_config, clients use library defaults and log a
# warning on every construction. Run `init --full` for the tuning keys.

model_name: "gemini-1.5-flash"
"#;

const YAML_FULL: &str = r#"# genai-resolver remote config
#
# Every key is a remote config parameter. Strings are used verbatim;
# tables are re-encoded as JSON before they reach the client factory.

# Model used by the summarize, photo_reasoning and chat clients.
# A change to this key is activated as soon as it is fetched.
model_name: "gemini-1.5-flash"

# Sampling parameters. Any out-of-range value makes the whole config fall
# back to the library defaults shown here. Changes stay pending until the
# next activation.
generation_config:
  temperature: 1.0          # 0.0 to 2.0
  topP: 0.95                # 0.0 to 1.0
  topK: 40                  # positive integer
  maxOutputTokens: 8192     # positive integer
  stopSequences: []         # array of strings, ignored if malformed
"#;

const JSON_MINIMAL: &str = r#"{
  "model_name": "gemini-1.5-flash"
}
"#;

const JSON_FULL: &str = r#"{
  "model_name": "gemini-1.5-flash",
  "generation_config": {
    "temperature": 1.0,
    "topP": 0.95,
    "topK": 40,
    "maxOutputTokens": 8192,
    "stopSequences": []
  }
}
"#;

const TOML_MINIMAL: &str = r#"# genai-resolver remote config
#
# Without generation_config, clients use library defaults and log a
# warning on every construction. Run `init --full` for the tuning keys.

model_name = "gemini-1.5-flash"
"#;

const TOML_FULL: &str = r#"# genai-resolver remote config
#
# Every key is a remote config parameter. Strings are used verbatim;
# tables are re-encoded as JSON before they reach the client factory.

# Model used by the summarize, photo_reasoning and chat clients.
model_name = "gemini-1.5-flash"

# Out-of-range values make the whole table fall back to these defaults.
[generation_config]
temperature = 1.0        # 0.0 to 2.0
topP = 0.95              # 0.0 to 1.0
topK = 40                # positive integer
maxOutputTokens = 8192   # positive integer
stopSequences = []       # array of strings
"#;
