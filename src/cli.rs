//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, resolve, validate, init, health), and their associated
//! argument structs. Every flag has an environment variable equivalent
//! for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "genai-resolver",
    version,
    about = "Remote-configuration-driven client factory for generative AI models",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        genai-resolver init                       Create a starter remote config\n  \
        genai-resolver resolve chat               Print the resolved chat client\n  \
        genai-resolver run                        Serve clients with live updates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the resolver server with live config updates
    Run(Box<RunArgs>),

    /// Resolve one client against the current remote config and print it
    Resolve(ResolveArgs),

    /// Validate a remote config file without starting
    Validate(ValidateArgs),

    /// Generate a starter remote config file
    Init(InitArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

/// Where remote values and in-app defaults come from.
#[derive(Args, Clone)]
pub struct SourceArgs {
    /// Remote config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "REMOTE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// URL of a remote JSON config document
    #[arg(long, env = "REMOTE_CONFIG_URL", help_heading = "Remote Backends")]
    pub remote_url: Option<String>,

    /// Redis connection URL
    #[cfg(feature = "redis")]
    #[arg(long, env = "REDIS_URL", help_heading = "Remote Backends")]
    pub redis_url: Option<String>,

    /// Config namespace (for remote backends)
    #[arg(short, long, env = "GENAI_NAMESPACE", default_value = "default")]
    pub namespace: String,

    /// In-app defaults file, used until remote values are activated
    #[arg(long, env = "REMOTE_CONFIG_DEFAULTS")]
    pub defaults: Option<PathBuf>,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        genai-resolver run                                   Auto-detect config\n  \
        genai-resolver run -c remote-config.yaml --pretty    Local dev mode\n  \
        genai-resolver run --remote-url https://cfg/app.json  Remote JSON config")]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,

    // -- Tuning --
    /// Keys whose change activates fetched values immediately
    #[arg(
        long = "activate-on",
        env = "ACTIVATE_ON",
        value_delimiter = ',',
        default_value = "model_name",
        help_heading = "Tuning"
    )]
    pub activate_on: Vec<String>,

    /// Interval in seconds between checks for remote config changes
    #[arg(
        long,
        env = "POLL_INTERVAL_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..),
        help_heading = "Tuning"
    )]
    pub poll_interval: u64,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 65_536,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        genai-resolver resolve chat                     Chat client as text\n  \
        genai-resolver resolve summarize --json         Summarizer as JSON\n  \
        genai-resolver resolve functions_chat -c remote-config.toml")]
pub struct ResolveArgs {
    /// Client kind: summarize, photo_reasoning, chat, functions_chat
    pub kind: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Remote config file to validate
    #[arg(default_value = "remote-config.yaml")]
    pub config: PathBuf,

    /// Defaults file layered under the config before validation
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        genai-resolver init                          Quick start config (yaml)\n  \
        genai-resolver init --full                   Documented template\n  \
        genai-resolver init -f toml -o config.toml   TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include full documentation as comments
    #[arg(long)]
    pub full: bool,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
