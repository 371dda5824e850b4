//! Generation tuning parameters and their parser.
//!
//! [`GenerationConfig`] is the validated, immutable value object handed to
//! every dynamically configured client. [`parser`] turns the raw
//! `generation_config` remote value into one, substituting defaults when
//! the value is malformed.

pub mod model;
pub mod parser;

pub use model::GenerationConfig;
pub use parser::{parse, parse_with_diagnostics, ParseOutcome};
