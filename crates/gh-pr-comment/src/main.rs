use clap::Parser;
use std::process::ExitCode;

mod cli;
mod logger;
mod orchestrator;
mod output;
mod resolver;
mod run;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before the logger so it can set RUST_LOG too
    let dotenv = dotenvy::dotenv();
    logger::init(cli.verbose);
    match dotenv {
        Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
        Err(_) => log::debug!(".env file not found, will rely on environment variables"),
    }

    log::info!("Starting gh-pr-comment");
    let outputs = run::run(cli).await;

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();
    if let Err(e) = output::print_outputs(&outputs, &mut stdout, &mut stderr) {
        log::error!("Failed to print results: {}", e);
    }

    ExitCode::from(output::exit_code(&outputs))
}
