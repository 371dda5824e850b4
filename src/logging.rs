//! Structured logging setup using the `tracing` ecosystem.
//!
//! Configures a `tracing-subscriber` with either JSON output (for
//! production) or pretty-printed output (for TTY / local dev). Format
//! is auto-detected from the terminal but can be forced via `--json`
//! or `--pretty`. With the `sentry-integration` feature, warnings and
//! errors are also forwarded to Sentry.

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[must_use]
pub fn resolve_format(pretty: bool, json: bool) -> LogFormat {
    if json {
        LogFormat::Json
    } else if pretty || std::io::IsTerminal::is_terminal(&std::io::stdout()) {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}

/// Level filter for this crate, with the HTTP client stack held at `warn`
/// unless the requested level is stricter.
#[must_use]
pub fn filter(level: &LogLevel) -> Targets {
    let level = level.to_tracing_level();
    let noisy = level.min(Level::WARN);
    Targets::new()
        .with_default(level)
        .with_target("hyper_util", noisy)
        .with_target("rustls", noisy)
}

pub fn init(level: &LogLevel, format: LogFormat) {
    let output = match format {
        LogFormat::Json => fmt::layer().json().with_target(false).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    let registry = tracing_subscriber::registry()
        .with(filter(level))
        .with(output);

    #[cfg(feature = "sentry-integration")]
    let registry = registry.with(sentry_tracing::layer());

    registry.init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_wins() {
        assert_eq!(resolve_format(false, true), LogFormat::Json);
    }

    #[test]
    fn pretty_flag_forces_pretty() {
        assert_eq!(resolve_format(true, false), LogFormat::Pretty);
    }

    #[test]
    fn http_stack_is_quieter_than_debug() {
        let targets = filter(&LogLevel::Debug);
        assert!(targets.would_enable("genai_resolver::config", &Level::DEBUG));
        assert!(!targets.would_enable("hyper_util::client", &Level::DEBUG));
        assert!(targets.would_enable("hyper_util::client", &Level::WARN));
    }

    #[test]
    fn error_level_applies_everywhere() {
        let targets = filter(&LogLevel::Error);
        assert!(!targets.would_enable("rustls", &Level::WARN));
        assert!(targets.would_enable("rustls", &Level::ERROR));
    }
}
