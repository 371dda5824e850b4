//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`], [`resolve`], [`init`], [`validate`], or
//! [`health`]. Source resolution shared by `run` and `resolve` lives in
//! [`sources`].

pub mod health;
pub mod init;
pub mod resolve;
pub mod run;
pub mod sources;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::ResolverError;

pub async fn dispatch(cli: Cli) -> Result<(), ResolverError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Resolve(args)) => resolve::execute(args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GENAI_RESOLVER_GIT_SHORT");
    println!(
        "\n  genai-resolver v{version} ({commit}): remote-config-driven model clients\n\n  \
         No command provided. To get started:\n\n    \
         genai-resolver init                      Generate a starter remote config\n    \
         genai-resolver resolve chat              Resolve a client once (auto-detects ./remote-config.yaml)\n    \
         genai-resolver run                       Serve clients with live config updates\n    \
         genai-resolver --help                    See all commands and options\n"
    );
}
