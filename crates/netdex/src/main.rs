mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netdex_core::Inventory;

use crate::cli::{Cli, Command, GlobalOpts, ServerCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let cmd = match cli.command {
        // Config commands don't need a server connection
        Command::Config(args) => return commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "netdex", &mut std::io::stdout());
            return Ok(());
        }

        Command::Devices(args) => ServerCommand::Devices(args),
        Command::People(args) => ServerCommand::People(args),
        Command::Scans(args) => ServerCommand::Scans(args),
    };

    let inventory = connect(&cli.global)?;
    tracing::debug!(command = ?cmd, "dispatching command");
    commands::dispatch(cmd, &inventory, &cli.global).await
}

/// Resolve the server from config and flags, then build the inventory facade.
fn connect(global: &GlobalOpts) -> Result<Inventory, CliError> {
    let cfg = config::load_config_or_default();
    let server = config::resolve_server_config(global, &cfg)?;
    tracing::debug!(url = %server.url, "connecting to inventory server");

    let quiet = global.quiet;
    let inventory = Inventory::connect(&server)?.with_notifier(Arc::new(move |msg: &str| {
        if !quiet {
            eprintln!("✓ {msg}");
        }
    }));
    Ok(inventory)
}
