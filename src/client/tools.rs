//! Callable tool declarations for function-calling clients.
//!
//! A [`FunctionDeclaration`] carries the name, description and JSON
//! parameter schema the model sees, plus a local handler that runs when
//! the model asks for the function. Handlers receive the argument object
//! and return the JSON response sent back to the model.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ResolverError;

pub type FunctionHandler =
    Arc<dyn Fn(&Map<String, Value>) -> Result<Value, ResolverError> + Send + Sync>;

/// JSON schema of a function's parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// An object schema with a single required string property.
    #[must_use]
    pub fn string(name: &str, description: &str) -> Self {
        Self(json!({
            "type": "object",
            "properties": {
                name: { "type": "string", "description": description }
            },
            "required": [name],
        }))
    }
}

#[derive(Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Schema,
    #[serde(skip)]
    handler: FunctionHandler,
}

impl fmt::Debug for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDeclaration")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl FunctionDeclaration {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Schema,
        handler: impl Fn(&Map<String, Value>) -> Result<Value, ResolverError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(handler),
        }
    }

    pub fn call(&self, args: &Map<String, Value>) -> Result<Value, ResolverError> {
        (self.handler)(args)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

impl Tool {
    #[must_use]
    pub fn new(function_declarations: Vec<FunctionDeclaration>) -> Self {
        Self {
            function_declarations,
        }
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.function_declarations.iter().find(|f| f.name == name)
    }
}

pub const UPPER_CASE_FUNCTION: &str = "upperCase";

/// `upperCase(input)` → `{"response": INPUT}`.
#[must_use]
pub fn upper_case() -> FunctionDeclaration {
    FunctionDeclaration::new(
        UPPER_CASE_FUNCTION,
        "Returns the upper case version of the input string",
        Schema::string("input", "Text to transform"),
        |args| {
            let input = args.get("input").and_then(Value::as_str).ok_or_else(|| {
                ResolverError::InvalidFunctionArgs {
                    name: UPPER_CASE_FUNCTION.into(),
                    message: "missing string argument 'input'".into(),
                }
            })?;
            Ok(json!({ "response": input.to_uppercase() }))
        },
    )
}

/// The fixed tool set of the function-calling chat client.
#[must_use]
pub fn functions_chat_tools() -> Vec<Tool> {
    vec![Tool::new(vec![upper_case()])]
}
