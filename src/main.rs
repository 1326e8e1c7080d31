use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use habits::cli::args::{Cli, OutputFormat};
use habits::cli::commands::{self, Context};
use habits::config::{Config, Paths};
use habits::storage::Database;

/// Overrides the `-v` derived log level, e.g. `HABITS_LOG=habits=trace`.
const LOG_ENV: &str = "HABITS_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {e:#}", "error".red().bold());
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, ansi: bool) -> Result<()> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} filter"))?,
        _ => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                _ => "debug",
            };
            EnvFilter::new(format!("habits={level}"))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    // No escape codes on stderr in JSON mode
    init_logging(cli.verbose, cli.output != Some(OutputFormat::Json))?;

    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();

    let db_path = cli.db.clone().unwrap_or_else(|| paths.database.clone());
    let db = Database::open_at(&db_path)
        .with_context(|| format!("could not open {}", db_path.display()))?;

    let today = config.stats.clock.today();
    debug!(%today, db = %db_path.display(), "starting");

    let mut ctx = Context {
        db,
        format: cli.output.unwrap_or(config.general.default_output),
        config,
        config_path: paths.config_file,
        user_override: cli.user,
        today,
    };

    let output = commands::dispatch(&mut ctx, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
