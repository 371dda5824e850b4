//! Optional Sentry error tracking.
//!
//! The returned guard must be held for the lifetime of the process so
//! panics and `error`-level events are flushed before exit.

pub fn init(dsn: &str, environment: Option<&str>, namespace: &str) -> sentry::ClientInitGuard {
    let dsn = dsn
        .parse()
        .map_err(|e| tracing::warn!(error = %e, "invalid Sentry DSN, error tracking disabled"))
        .ok();

    let guard = sentry::init(sentry::ClientOptions {
        dsn,
        environment: environment.map(|e| e.to_string().into()),
        release: Some(concat!("genai-resolver@", env!("CARGO_PKG_VERSION")).into()),
        attach_stacktrace: true,
        ..Default::default()
    });

    let namespace = namespace.to_string();
    sentry::configure_scope(|scope| scope.set_tag("namespace", namespace));
    guard
}
