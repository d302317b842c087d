mod commands;
mod config;
mod error;
mod logging;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use commands::{CheckArgs, GenerateArgs, IntrospectArgs, run_check, run_generate, run_introspect};
use config::CliConfig;
use error::{CliError, CliResult};

#[derive(Parser, Debug)]
#[command(
    name = "learnpath-schema",
    version,
    about = "Introspect the learning-path database, generate its Rust mirror and check for drift"
)]
struct Cli {
    /// Config file (defaults to ./learnpath-schema.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a snapshot of the live schema to disk.
    Introspect(IntrospectArgs),
    /// Render the Rust mirror from a snapshot or a live database.
    Generate(GenerateArgs),
    /// Compare the compiled-in mirror with a snapshot or a live database.
    Check(CheckArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Introspect(_) => "introspect",
            Command::Generate(_) => "generate",
            Command::Check(_) => "check",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; DATABASE_URL may come from the real environment.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.log_json) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Drift(_)) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let command = cli.command.name();
    let timer = Instant::now();
    tracing::info!(event = "command_started", command);

    match cli.command {
        Command::Introspect(args) => run_introspect(args, &config).await?,
        Command::Generate(args) => run_generate(args, &config).await?,
        Command::Check(args) => run_check(args, &config).await?,
    }

    tracing::info!(
        event = "command_finished",
        command,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}
