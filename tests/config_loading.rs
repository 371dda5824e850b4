//! Integration tests for remote config files across all formats.

use genai_resolver::client::{ClientFactory, ClientKind};
use genai_resolver::config::snapshot::RemoteConfigSnapshot;
use genai_resolver::config::sources::parse_values_str;
use genai_resolver::config::validation::validate;
use genai_resolver::config::RemoteValues;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

fn snapshot(values: RemoteValues) -> RemoteConfigSnapshot {
    values.into_iter().collect()
}

#[test]
fn json_example_keeps_string_values_verbatim() {
    let content = load_example("remote-config.json");
    let values = parse_values_str("json", &content, "remote-config.json").unwrap();
    validate(&values).unwrap();

    let model = ClientFactory::new().create(ClientKind::Chat, &snapshot(values));
    assert_eq!(model.model_name, "gemini-1.5-pro");
    let config = model.generation_config.unwrap();
    assert!((config.temperature() - 0.4).abs() < f32::EPSILON);
    assert_eq!(config.max_output_tokens(), 1024);
}

#[cfg(feature = "yaml")]
#[test]
fn yaml_example_nested_table_becomes_json() {
    let content = load_example("remote-config.yaml");
    let values = parse_values_str("yaml", &content, "remote-config.yaml").unwrap();
    validate(&values).unwrap();
    assert!(values["generation_config"].starts_with('{'));

    let model = ClientFactory::new().create(ClientKind::Summarizer, &snapshot(values));
    let config = model.generation_config.unwrap();
    assert_eq!(config.top_k(), 32);
    assert_eq!(config.stop_sequences(), ["END"]);
}

#[cfg(feature = "yaml")]
#[test]
fn broken_example_reports_every_problem() {
    let content = load_example("broken.yaml");
    let values = parse_values_str("yaml", &content, "broken.yaml").unwrap();
    let errors = validate(&values).unwrap_err();

    assert!(errors.iter().any(|e| e.key == "model_name"
        && e.suggestion.as_deref() == Some("did you mean 'gemini-1.5-flash'?")));
    assert!(errors.iter().any(|e| e.field == "temperature"));

    // Runtime resolution still succeeds, with library defaults
    let model = ClientFactory::new().create(ClientKind::Chat, &snapshot(values));
    assert!(model.generation_config.unwrap().is_default());
}

#[cfg(feature = "yaml")]
#[test]
fn defaults_example_names_a_model() {
    let content = load_example("defaults.yaml");
    let values = parse_values_str("yaml", &content, "defaults.yaml").unwrap();
    assert_eq!(values["model_name"], "gemini-1.5-flash");
}

#[cfg(feature = "toml")]
#[test]
fn toml_example_loads_and_validates() {
    let content = load_example("remote-config.toml");
    let values = parse_values_str("toml", &content, "remote-config.toml").unwrap();
    validate(&values).unwrap();

    let model = ClientFactory::new().create(ClientKind::PhotoReasoner, &snapshot(values));
    assert_eq!(
        model.generation_config.unwrap().stop_sequences(),
        ["STOP", "END"]
    );
}

#[test]
fn unsupported_extension_errors() {
    let result = parse_values_str("ini", "model_name = x", "remote-config.ini");
    assert!(result.is_err());
}

#[test]
fn invalid_json_errors() {
    let result = parse_values_str("json", "{ not json", "bad.json");
    assert!(result.is_err());
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn file_source_versions_by_content() {
    use genai_resolver::config::{ConfigSource, ConfigVersion};

    let source = genai_resolver::config::sources::yaml::new("example/remote-config.yaml".into());
    let (values, version) = source.load().await.unwrap();
    assert_eq!(source.name(), "yaml");
    assert_eq!(values["model_name"], "gemini-1.5-flash");
    assert!(!source.has_changed(&version).await.unwrap());
    assert!(source.has_changed(&ConfigVersion::Defaults).await.unwrap());
}

#[tokio::test]
async fn missing_file_is_reported_by_path() {
    use genai_resolver::config::ConfigSource;
    use genai_resolver::error::ResolverError;

    let source = genai_resolver::cmd::sources::create_file_source(std::path::Path::new(
        "example/missing.yaml",
    ));
    #[cfg(feature = "yaml")]
    {
        let err = source.ok().unwrap().load().await.unwrap_err();
        assert!(matches!(err, ResolverError::ConfigFileNotFound { .. }));
    }
    #[cfg(not(feature = "yaml"))]
    assert!(matches!(source, Err(ResolverError::UnsupportedFormat(_))));
}
