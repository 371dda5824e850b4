//! `genai-resolver resolve`: build one client descriptor and print it.
//!
//! Runs a single fetch-and-activate against the configured sources, then
//! asks the [`ClientFactory`] for the requested kind. A failed fetch is
//! reported on stderr and the in-app defaults are used instead.

use crate::cli::ResolveArgs;
use crate::client::{ClientFactory, ClientKind, GenerativeModel};
use crate::error::ResolverError;

use super::sources;

pub async fn execute(args: ResolveArgs) -> Result<(), ResolverError> {
    // Reject unknown kinds before touching any source
    let kind: ClientKind = args.kind.parse()?;

    let store = sources::build_store(&args.source).await?;
    if let Err(e) = store.fetch_and_activate().await {
        eprintln!("warning: {e}\n  using in-app defaults");
    }

    let snapshot = store.current();
    let model = ClientFactory::new().create(kind, &snapshot);

    if args.json {
        let json = serde_json::to_string_pretty(&model).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        print!("{}", render(&model, snapshot.source()));
    }
    Ok(())
}

fn render(model: &GenerativeModel, source: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "\u{2713} {} (activation {}, source {source})",
        model.kind, model.activation
    );
    let _ = writeln!(out, "  model:              {}", model.model_name);

    match model.generation_config {
        Some(ref config) => {
            let _ = writeln!(out, "  temperature:        {}", config.temperature());
            let _ = writeln!(out, "  top_p:              {}", config.top_p());
            let _ = writeln!(out, "  top_k:              {}", config.top_k());
            let _ = writeln!(out, "  max_output_tokens:  {}", config.max_output_tokens());
            let stops = config.stop_sequences();
            if !stops.is_empty() {
                let _ = writeln!(out, "  stop_sequences:     {}", stops.join(", "));
            }
        }
        None => {
            let _ = writeln!(out, "  generation config:  (not remotely tuned)");
        }
    }

    for declaration in model.tools.iter().flat_map(|t| &t.function_declarations) {
        let _ = writeln!(
            out,
            "  tool:               {} ({})",
            declaration.name, declaration.description
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::snapshot::RemoteConfigSnapshot;

    #[test]
    fn renders_tuned_client() {
        let snapshot: RemoteConfigSnapshot = [
            ("model_name", "model-A"),
            (
                "generation_config",
                r#"{"temperature":0.5,"topP":0.9,"topK":16,"maxOutputTokens":512,"stopSequences":["END"]}"#,
            ),
        ]
        .into_iter()
        .collect();
        let model = ClientFactory::new().create(ClientKind::Chat, &snapshot);
        let text = render(&model, "file");
        assert!(text.contains("model:              model-A"));
        assert!(text.contains("temperature:        0.5"));
        assert!(text.contains("stop_sequences:     END"));
    }

    #[test]
    fn renders_function_tools() {
        let snapshot: RemoteConfigSnapshot = [("model_name", "model-A")].into_iter().collect();
        let model = ClientFactory::new().create(ClientKind::FunctionsChat, &snapshot);
        let text = render(&model, "defaults");
        assert!(text.contains("(not remotely tuned)"));
        assert!(text.contains("tool:               upperCase"));
    }
}
