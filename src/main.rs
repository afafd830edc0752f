// Entrypoint for the `veo` CLI.
// - Keeps `main` small: parse flags, set up logging, build a client and
//   hand it to the matching UI flow.
// - Errors are printed once with their full context chain.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use veo_cli::api::ListOptions;
use veo_cli::cli::{Cli, Commands};
use veo_cli::ui;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays clean for tables and JSON.
fn init_logging(verbose: bool) {
    let default = if verbose { "veo_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings();

    match cli.command {
        Commands::List { page, all, json, .. } => {
            let api = settings.client()?;
            let club = settings.club(None)?;
            let opts = ListOptions {
                page,
                fetch_all: all,
            };
            ui::run_list(&api, &club, opts, json)
        }
        Commands::Get { recording, json, .. } => {
            let api = settings.client()?;
            let club = settings.club(None).ok();
            ui::run_get(&api, &recording, club.as_deref(), json)
        }
        Commands::Update => anyhow::bail!("not yet implemented"),
    }
}
