//! genai-resolver builds generative-model client descriptors from remote
//! configuration.
//!
//! A remote key/value source supplies the model identifier and a JSON
//! generation config. Fetched values are staged, then activated atomically,
//! and every client is built from whichever snapshot is active at that
//! moment. A background poller watches the source and activates new values
//! as soon as the model identifier changes.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, resolve, validate, init, health).
//! - [`config`] -- Remote config sources, snapshots, and the two-phase
//!   [`ConfigStore`](config::store::ConfigStore).
//! - [`generation`] -- `GenerationConfig` and its forgiving JSON parser.
//! - [`client`] -- Client kinds, function-calling tools, and the
//!   [`ClientFactory`](client::ClientFactory).
//! - [`update`] -- Change polling and the activation policy for live updates.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`api`] -- Client resolution and config control endpoints.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared application state, and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `redis` | Redis hash config backend |
//! | `sentry-integration` | Sentry error tracking |
//! | `file-backends` | All file format backends |
//! | `full` | All features |

// Public functions serve the binary and its integration tests.
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod cli;
pub mod client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod generation;
pub mod health;
pub mod logging;
pub mod server;
pub mod update;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
