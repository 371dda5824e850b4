//! `genai-resolver run`: start the resolver server.
//!
//! Resolves config sources, performs the startup fetch-and-activate,
//! spawns the realtime update poller and its listener, and serves the
//! HTTP API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::sources;
use crate::cli::RunArgs;
use crate::config::store::ConfigStore;
use crate::error::ResolverError;
use crate::logging;
use crate::server::{self, AppState};
use crate::update::{RealtimeUpdates, UpdateListener};

pub async fn execute(args: RunArgs) -> Result<(), ResolverError> {
    logging::init(
        &args.log_level,
        logging::resolve_format(args.pretty, args.json),
    );

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args.sentry_dsn.as_ref().map(|dsn| {
        crate::sentry_integration::init(
            dsn,
            args.sentry_environment.as_deref(),
            &args.source.namespace,
        )
    });

    let store = Arc::new(sources::build_store(&args.source).await?);
    initial_fetch(&store).await;

    // Dropping or signalling shutdown_tx stops both background tasks
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (updates, events) =
        RealtimeUpdates::new(store.clone(), Duration::from_secs(args.poll_interval));
    let listener = UpdateListener::new(store.clone(), args.activate_on.iter().cloned());
    tracing::debug!(keys = ?listener.activation_keys(), "activation keys");

    let updates_handle = tokio::spawn(updates.run(shutdown_rx.clone()));
    let listener_handle = tokio::spawn(listener.run(events, shutdown_rx));

    let state = Arc::new(AppState::new(store.clone(), args.source.namespace.clone()));
    let router = server::build_router(state, args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let tcp = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        source = store.source_name(),
        namespace = %args.source.namespace,
        model = store.current().model_name(),
        commit = env!("GENAI_RESOLVER_GIT_SHORT"),
        profile = env!("GENAI_RESOLVER_BUILD_PROFILE"),
        built = env!("GENAI_RESOLVER_BUILD_TIME"),
        "genai-resolver started"
    );

    let graceful_shutdown = async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    };

    axum::serve(tcp, router)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    for (task, handle) in [
        ("realtime updates", updates_handle),
        ("update listener", listener_handle),
    ] {
        if let Err(e) = handle.await {
            tracing::error!(task, error = %e, "background task failed");
        }
    }

    tracing::info!("genai-resolver stopped");
    Ok(())
}

/// Fetch and activate once at startup. Failure keeps the defaults active.
pub async fn initial_fetch(store: &ConfigStore) {
    match store.fetch_and_activate().await {
        Ok(activated) => {
            let snapshot = store.current();
            tracing::info!(
                activated,
                activation = snapshot.activation(),
                model = snapshot.model_name(),
                "config params updated"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "initial config fetch failed, serving in-app defaults");
        }
    }
}
