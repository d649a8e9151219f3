// ABOUTME: Entry point for the vendeploy CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::DeployOptions;
use std::env;
use tracing_subscriber::EnvFilter;
use vendeploy::config::{self, Config};
use vendeploy::error::Result;
use vendeploy::output::{Output, OutputMode};

#[tokio::main]
async fn main() {
    // .env supplies PRIVATE_KEY / API_KEY style secrets; a missing file is fine
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, Output::new(mode)).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => Config::discover(&env::current_dir()?),
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match &cli.command {
        Commands::Init { force } => {
            let path = config::init_config(&env::current_dir()?, *force)?;
            output.success(&format!("Created {}", path.display()));
            Ok(())
        }
        Commands::Plan { network } => {
            let config = load_config(&cli)?;
            commands::plan(&config, network.as_deref(), &output)
        }
        Commands::Deploy {
            network,
            no_verify,
            strict_verify,
        } => {
            let config = load_config(&cli)?;
            let options = DeployOptions {
                network: network.clone(),
                no_verify: *no_verify,
                strict_verify: *strict_verify,
            };
            commands::deploy(config, options, output).await
        }
        Commands::Verify {
            network,
            strict_verify,
        } => {
            let config = load_config(&cli)?;
            commands::verify(config, network.clone(), *strict_verify, output).await
        }
    }
}
