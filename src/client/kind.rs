//! The closed set of client kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientKind {
    #[serde(rename = "summarize")]
    Summarizer,
    #[serde(rename = "photo_reasoning")]
    PhotoReasoner,
    #[serde(rename = "chat")]
    Chat,
    #[serde(rename = "functions_chat")]
    FunctionsChat,
}

impl ClientKind {
    pub const ALL: [Self; 4] = [
        Self::Summarizer,
        Self::PhotoReasoner,
        Self::Chat,
        Self::FunctionsChat,
    ];

    /// Route name used on the CLI and in HTTP paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summarizer => "summarize",
            Self::PhotoReasoner => "photo_reasoning",
            Self::Chat => "chat",
            Self::FunctionsChat => "functions_chat",
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientKind {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ResolverError::UnsupportedClientKind { kind: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ClientKind::ALL {
            assert_eq!(kind.as_str().parse::<ClientKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.to_string())
            );
        }
    }

    #[test]
    fn unknown_name_is_unsupported() {
        let err = "translate".parse::<ClientKind>().unwrap_err();
        assert!(
            matches!(err, ResolverError::UnsupportedClientKind { ref kind } if kind == "translate")
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Chat".parse::<ClientKind>().is_err());
    }
}
