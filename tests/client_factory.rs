//! Integration tests for generation config parsing and client construction.

use genai_resolver::client::factory::FUNCTIONS_CHAT_MODEL;
use genai_resolver::client::tools::UPPER_CASE_FUNCTION;
use genai_resolver::client::{ClientFactory, ClientKind};
use genai_resolver::config::snapshot::RemoteConfigSnapshot;
use genai_resolver::error::{MalformedConfig, ResolverError};
use genai_resolver::generation::{parse, parse_with_diagnostics, GenerationConfig};
use serde_json::{json, Map};

const MODEL_A_CONFIG: &str = r#"{"temperature":0.5,"topP":0.9,"topK":10,"maxOutputTokens":256,"stopSequences":["END"]}"#;

fn snapshot(pairs: &[(&str, &str)]) -> RemoteConfigSnapshot {
    pairs.iter().copied().collect()
}

#[test]
fn valid_config_keeps_every_field() {
    let raw = r#"{"temperature":1.75,"topP":0.25,"topK":3,"maxOutputTokens":100000,"stopSequences":["b","a","b"]}"#;
    let config = parse(raw);
    assert!((config.temperature() - 1.75).abs() < f32::EPSILON);
    assert!((config.top_p() - 0.25).abs() < f32::EPSILON);
    assert_eq!(config.top_k(), 3);
    assert_eq!(config.max_output_tokens(), 100_000);
    assert_eq!(config.stop_sequences(), ["b", "a", "b"]);
}

#[test]
fn serialized_config_parses_back_unchanged() {
    let config = parse(MODEL_A_CONFIG);
    let raw = serde_json::to_string(&config).unwrap();
    assert_eq!(parse(&raw), config);
}

#[test]
fn malformed_inputs_fall_back_with_one_diagnostic() {
    for raw in [
        "not json",
        "",
        "[]",
        "42",
        r#"{"temperature":"hot","topP":0.9,"topK":10,"maxOutputTokens":256}"#,
        r#"{"temperature":0.5,"topP":0.9,"topK":10}"#,
        r#"{"temperature":0.5,"topP":1.5,"topK":10,"maxOutputTokens":256}"#,
        r#"{"temperature":0.5,"topP":0.9,"topK":0,"maxOutputTokens":256}"#,
    ] {
        let outcome = parse_with_diagnostics(raw);
        assert_eq!(outcome.config, GenerationConfig::default(), "input: {raw:?}");
        assert!(outcome.is_fallback(), "input: {raw:?}");
    }
}

#[test]
fn bad_stop_sequences_only_drop_that_field() {
    let outcome = parse_with_diagnostics(
        r#"{"temperature":0.5,"topP":0.9,"topK":10,"maxOutputTokens":256,"stopSequences":"END"}"#,
    );
    assert!(matches!(
        outcome.diagnostic,
        Some(MalformedConfig::InvalidStopSequences { .. })
    ));
    assert!(!outcome.is_fallback());
    assert_eq!(outcome.config.top_k(), 10);
    assert!(outcome.config.stop_sequences().is_empty());
}

#[test]
fn chat_client_from_model_a_snapshot() {
    let snapshot = snapshot(&[
        ("model_name", "model-A"),
        ("generation_config", MODEL_A_CONFIG),
    ]);
    let model = ClientFactory::new().create(ClientKind::Chat, &snapshot);

    assert_eq!(model.model_name, "model-A");
    let expected = GenerationConfig::new(0.5, 0.9, 10, 256, vec!["END".into()]).unwrap();
    assert_eq!(model.generation_config, Some(expected));
    assert!(model.tools.is_empty());
}

#[test]
fn summarizer_survives_unparsable_config() {
    let snapshot = snapshot(&[("model_name", "model-A"), ("generation_config", "not json")]);
    let model = ClientFactory::new().create(ClientKind::Summarizer, &snapshot);

    assert_eq!(model.model_name, "model-A");
    assert_eq!(model.generation_config, Some(GenerationConfig::default()));
}

#[test]
fn missing_generation_config_uses_defaults() {
    let snapshot = snapshot(&[("model_name", "model-A")]);
    for kind in [
        ClientKind::Summarizer,
        ClientKind::PhotoReasoner,
        ClientKind::Chat,
    ] {
        let model = ClientFactory::new().create(kind, &snapshot);
        assert_eq!(model.generation_config, Some(GenerationConfig::default()));
    }
}

#[test]
fn functions_chat_ignores_snapshot() {
    let factory = ClientFactory::new();
    for snapshot in [
        snapshot(&[]),
        snapshot(&[("model_name", "model-A"), ("generation_config", MODEL_A_CONFIG)]),
        snapshot(&[("model_name", "other"), ("generation_config", "not json")]),
    ] {
        let model = factory.create(ClientKind::FunctionsChat, &snapshot);
        assert_eq!(model.model_name, FUNCTIONS_CHAT_MODEL);
        assert!(model.generation_config.is_none());
        assert_eq!(model.tools.len(), 1);
        assert!(model.function(UPPER_CASE_FUNCTION).is_some());
    }
}

#[test]
fn unknown_kind_is_rejected() {
    let snapshot = snapshot(&[("model_name", "model-A")]);
    for name in ["translator", "", "Chat", "functions-chat"] {
        let err = ClientFactory::new()
            .create_named(name, &snapshot)
            .unwrap_err();
        assert!(
            matches!(err, ResolverError::UnsupportedClientKind { ref kind } if kind == name),
            "name: {name:?}"
        );
    }
}

#[test]
fn route_names_resolve_to_kinds() {
    let snapshot = snapshot(&[("model_name", "model-A")]);
    for kind in ClientKind::ALL {
        let model = ClientFactory::new()
            .create_named(kind.as_str(), &snapshot)
            .unwrap();
        assert_eq!(model.kind, kind);
    }
}

#[test]
fn upper_case_tool_round_trip() {
    let model = ClientFactory::new().create(ClientKind::FunctionsChat, &snapshot(&[]));
    let mut args = Map::new();
    args.insert("input".into(), json!("Hello, World"));

    let result = model.call_function(UPPER_CASE_FUNCTION, &args).unwrap();
    assert_eq!(result, json!({ "response": "HELLO, WORLD" }));

    let err = model.call_function("lowerCase", &args).unwrap_err();
    assert!(matches!(err, ResolverError::UnknownFunction { .. }));
}
