//! `genai-resolver health`: query `GET /health` on a running instance.
//!
//! Displays the response as a short text summary or as raw JSON.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::ResolverError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), ResolverError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let uri: hyper::Uri =
        url.parse()
            .map_err(|e: hyper::http::uri::InvalidUri| ResolverError::UriParse {
                source: Box::new(e),
            })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| ResolverError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| ResolverError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| ResolverError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| ResolverError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(ResolverError::HealthCheckFailed(status));
    }

    let body = String::from_utf8_lossy(&body);
    if args.json {
        println!("{body}");
        return Ok(());
    }

    match serde_json::from_str::<HealthResponse>(&body) {
        Ok(health) => print!("{}", summarize(&args.url, &health)),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{body}");
        }
    }

    Ok(())
}

fn summarize(url: &str, health: &HealthResponse) -> String {
    let config = &health.config;
    let stats = &health.stats;
    let pending = if config.pending { ", update pending" } else { "" };
    format!(
        "\u{2713} genai-resolver is healthy ({url})\n  \
         version:      {} ({})\n  \
         uptime:       {}\n  \
         model:        {}\n  \
         config:       {} from {}, activation {} ({}s ago{pending})\n  \
         namespace:    {}\n  \
         clients:      {} created, {} function calls\n  \
         updates:      {} fetches, {} activations, {} errors\n",
        health.version,
        health.commit,
        format_uptime(health.uptime_seconds),
        config.model_name,
        config.version,
        config.source,
        config.activation,
        config.activated_ago_seconds,
        config.namespace,
        stats.clients_created,
        stats.function_calls,
        stats.fetches,
        stats.activations,
        stats.update_errors,
    )
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{ConfigHealth, StatsResponse};

    #[test]
    fn uptime_formats() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }

    #[test]
    fn summary_flags_pending_updates() {
        let health = HealthResponse {
            status: "healthy".into(),
            version: "0.1.0".into(),
            commit: "abc1234".into(),
            uptime_seconds: 5,
            config: ConfigHealth {
                source: "http".into(),
                version: "deadbeef".into(),
                activation: 3,
                activated_ago_seconds: 7,
                pending: true,
                namespace: "default".into(),
                model_name: "model-A".into(),
            },
            stats: StatsResponse {
                clients_created: 1,
                function_calls: 0,
                fetches: 4,
                activations: 3,
                update_errors: 0,
            },
        };
        let text = summarize("http://localhost:3000", &health);
        assert!(text.contains("model:        model-A"));
        assert!(text.contains("activation 3 (7s ago, update pending)"));
    }
}
