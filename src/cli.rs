// Command-line surface of the `veo` binary. Flags fall back to the
// `VEO_*` environment variables and are folded into `Settings`.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "veo", version)]
#[command(
    about = "CLI for Veo sports camera",
    long_about = "A command-line interface for interacting with the Veo sports camera API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API token
    #[arg(long, env = "VEO_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, env = "VEO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recordings
    #[command(long_about = "List all recordings/matches from your Veo camera.")]
    List {
        /// Club slug
        #[arg(short, long, env = "VEO_CLUB")]
        club: Option<String>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Fetch all pages
        #[arg(short, long)]
        all: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Get details for a specific recording
    #[command(
        long_about = "Get detailed information about a specific recording/match.\n\n\
                      Use \"latest\" to get the most recent recording."
    )]
    Get {
        /// Recording identifier, or "latest"
        #[arg(value_name = "RECORDING_ID|latest")]
        recording: String,

        /// Club slug (required for "latest")
        #[arg(short, long, env = "VEO_CLUB")]
        club: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update video metadata
    Update,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        let club = match &self.command {
            Commands::List { club, .. } | Commands::Get { club, .. } => club.clone(),
            Commands::Update => None,
        };
        Settings {
            token: self.token.clone(),
            club,
            api_url: self.api_url.clone(),
            timeout: Some(Duration::from_secs(self.timeout)),
        }
    }
}
