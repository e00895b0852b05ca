use anyhow::Result;
use clap::Parser;
use toolwatch::cli::{Cli, Commands};
use toolwatch::config::Settings;
use toolwatch::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "toolwatch=debug,tower_http=debug"
    } else if quiet {
        "warn"
    } else {
        "toolwatch=info,tower_http=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Digest(cmd) => cmd.execute()?,
        Commands::Sources(cmd) => cmd.execute()?,
        Commands::Serve(cmd) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd.execute(settings, cli.quiet).await?
        }
        Commands::Scan(cmd) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd.execute(settings, cli.quiet).await?
        }
        Commands::TestEmail(cmd) => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd.execute(settings, cli.quiet).await?
        }
    }
    Ok(())
}
