//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers, which receive the `CliContext` built
//! by bootstrap.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use modelmart_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over -v when both are present.
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli, command: &Commands) -> Result<(), CliError> {
    let ctx = bootstrap(CliConfig::from_cli(cli))?;

    match command {
        Commands::Browse(args) => handlers::browse::execute(&ctx, args).await,
        Commands::Facets { json } => handlers::facets::execute(&ctx, *json).await,
        Commands::Sample { count } => handlers::sample::execute(*count),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads MODELMART_* defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(&cli, command).await {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
