//! `genai-resolver validate`: check a remote config file before publishing it.
//!
//! Reports everything that would make the runtime fall back to defaults,
//! in either human-readable text or machine-readable JSON.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::snapshot::MODEL_NAME_KEY;
use crate::config::validation;
use crate::config::RemoteValues;
use crate::error::ResolverError;

use super::sources::read_values;

pub async fn execute(args: &ValidateArgs) -> Result<(), ResolverError> {
    let path = &args.config;

    let mut values = RemoteValues::new();
    if let Some(ref defaults) = args.defaults {
        values.extend(read_values(defaults).await?);
    }
    values.extend(read_values(path).await?);

    if let Err(errors) = validation::validate(&values) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "key": e.key,
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({ "valid": false, "errors": json_errors })
                );
            }
        }
        return Err(ResolverError::ConfigValidation { errors });
    }

    let warnings = validation::warnings(&values);
    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &values)
            );
            for warning in &warnings {
                eprintln!("! {warning}");
            }
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "keys": values.len(),
                    "model_name": values.get(MODEL_NAME_KEY),
                    "warnings": warnings,
                })
            );
        }
    }

    Ok(())
}
