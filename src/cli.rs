// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vendeploy")]
#[command(about = "Deploy, wire up, and verify a set of interdependent contracts")]
#[command(version)]
pub struct Cli {
    /// Path to the config file (default: discover vendeploy.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print deployed addresses and the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new vendeploy.yml configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Validate the config and print the deployment order (no network access)
    Plan {
        /// Network to plan for (defined in config)
        #[arg(short, long, env = "VENDEPLOY_NETWORK")]
        network: Option<String>,
    },

    /// Deploy all components, run the initialization call, and verify sources
    Deploy {
        /// Network to deploy to (defined in config)
        #[arg(short, long, env = "VENDEPLOY_NETWORK")]
        network: Option<String>,

        /// Skip source verification
        #[arg(long, conflicts_with = "strict_verify")]
        no_verify: bool,

        /// Exit non-zero if any component fails verification
        #[arg(long)]
        strict_verify: bool,
    },

    /// Re-run source verification for the last recorded deployment
    Verify {
        /// Network whose deployment record to verify
        #[arg(short, long, env = "VENDEPLOY_NETWORK")]
        network: Option<String>,

        /// Exit non-zero if any component fails verification
        #[arg(long)]
        strict_verify: bool,
    },
}
