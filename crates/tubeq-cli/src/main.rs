//! `tubeq` entry point - the composition root.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tubeq_cli::handlers::preset::UrlSource;
use tubeq_cli::{Cli, CliError, Commands, bootstrap, handlers};
use tubeq_core::{DateFilter, PresetOptions};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            eprintln!("Error: {err:#}");
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut ctx = bootstrap(cli.config)?;

    match command {
        Commands::Get { urls, finish } => {
            handlers::get::execute(&ctx, &urls, finish).await?;
        }
        Commands::Preset {
            name,
            catalog,
            batch,
            archive_dir,
            comments,
            date_filter,
            finish,
        } => {
            let source = UrlSource::from_args(batch, archive_dir)?;
            let options = PresetOptions {
                write_comments: comments,
                date_filter: date_filter.map_or(DateFilter::None, DateFilter::from),
            };
            handlers::preset::execute(&ctx, &name, &catalog, &source, options, finish).await?;
        }
        Commands::Command {
            url,
            preset,
            catalog,
        } => {
            handlers::command::execute(&ctx, &url, preset.as_deref(), catalog.as_deref())?;
        }
        Commands::Probe { url } => {
            handlers::probe::execute(&ctx, &url).await?;
        }
        Commands::CheckDeps => handlers::check_deps::execute(&ctx),
        Commands::Config { command } => {
            handlers::config::execute(&mut ctx, &command)?;
        }
    }

    Ok(())
}
