//! Dispatch from [`ClientKind`] to a configured [`GenerativeModel`].
//!
//! Summarizer, photo reasoning and chat clients read `model_name` and
//! `generation_config` from the snapshot on every call; nothing parsed is
//! cached across snapshots. The function-calling client is pinned to a
//! fixed model and tool set and does not take remote generation tuning.

use super::kind::ClientKind;
use super::tools::functions_chat_tools;
use super::GenerativeModel;
use crate::config::snapshot::RemoteConfigSnapshot;
use crate::error::ResolverError;
use crate::generation::parser;

pub const FUNCTIONS_CHAT_MODEL: &str = "gemini-1.5-pro-preview-0514";

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientFactory;

impl ClientFactory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn create(&self, kind: ClientKind, snapshot: &RemoteConfigSnapshot) -> GenerativeModel {
        let model = match kind {
            ClientKind::Summarizer | ClientKind::PhotoReasoner | ClientKind::Chat => {
                remotely_tuned(kind, snapshot)
            }
            ClientKind::FunctionsChat => GenerativeModel {
                kind,
                model_name: FUNCTIONS_CHAT_MODEL.to_string(),
                generation_config: None,
                tools: functions_chat_tools(),
                activation: snapshot.activation(),
            },
        };

        tracing::debug!(
            kind = %kind,
            model = %model.model_name,
            activation = model.activation,
            generation_config = ?model.generation_config,
            "client created"
        );
        model
    }

    /// Resolve `name` to a kind, then [`create`](Self::create).
    ///
    /// Unknown names fail with [`ResolverError::UnsupportedClientKind`].
    pub fn create_named(
        &self,
        name: &str,
        snapshot: &RemoteConfigSnapshot,
    ) -> Result<GenerativeModel, ResolverError> {
        let kind: ClientKind = name.parse()?;
        Ok(self.create(kind, snapshot))
    }
}

fn remotely_tuned(kind: ClientKind, snapshot: &RemoteConfigSnapshot) -> GenerativeModel {
    let model_name = snapshot.model_name();
    if model_name.is_empty() {
        tracing::warn!(kind = %kind, "model_name is empty in the active snapshot");
    }

    GenerativeModel {
        kind,
        model_name: model_name.to_string(),
        generation_config: Some(parser::parse(snapshot.generation_config_raw())),
        tools: Vec::new(),
        activation: snapshot.activation(),
    }
}
