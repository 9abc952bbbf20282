//! CLI entry point - the composition root.
//!
//! Parses arguments, wires the client through bootstrap and dispatches each
//! command to its handler.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use weave_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers, presentation};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(&config)?;

    let output = match command {
        Commands::Tenants {
            collection,
            command,
        } => handlers::tenants::execute(&ctx.tenants(&collection), command).await?,
        Commands::Gfl {
            collection,
            command,
        } => handlers::gfl::execute(&ctx.gfl(&collection), command).await?,
        Commands::Agent { command } => handlers::agents::execute(&ctx, command).await?,
    };
    presentation::print_json(&output)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err}");
        std::process::exit(code);
    }
}
