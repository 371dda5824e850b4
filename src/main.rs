use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = genai_resolver::cli::Cli::parse();
    if let Err(e) = genai_resolver::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
