//! Client descriptors and the factory that builds them.
//!
//! A [`GenerativeModel`] is everything a vendor SDK needs to construct a
//! model handle: model name, optional [`GenerationConfig`], and declared
//! tools. [`ClientFactory`] maps a [`ClientKind`] and a snapshot to one.

pub mod factory;
pub mod kind;
pub mod tools;

use serde::Serialize;
use serde_json::{Map, Value};

pub use factory::ClientFactory;
pub use kind::ClientKind;

use crate::error::ResolverError;
use crate::generation::GenerationConfig;
use tools::{FunctionDeclaration, Tool};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerativeModel {
    pub kind: ClientKind,
    pub model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    /// Activation marker of the snapshot this client was built from.
    pub activation: u64,
}

impl GenerativeModel {
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionDeclaration> {
        self.tools.iter().find_map(|tool| tool.function(name))
    }

    /// Run the local handler of a declared function.
    pub fn call_function(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Result<Value, ResolverError> {
        let function = self
            .function(name)
            .ok_or_else(|| ResolverError::UnknownFunction {
                name: name.to_string(),
                model: self.model_name.clone(),
            })?;
        function.call(args)
    }
}
