//! paramconf CLI
//!
//! Main entry point for the `configure` command-line tool.
//! Writes deployment parameters into the namespaced parameter store and keeps
//! a local cache of the last values for interactive sessions.

mod commands;

use clap::{CommandFactory, FromArgMatches, Parser};
use paramconf_configurator::{CacheFile, Configurator, Outcome};
use paramconf_core::{config::AppConfig, logging, AppResult};
use paramconf_store::{create_store, StoreOptions};
use std::path::PathBuf;

/// Configure SSM parameters for CDK deployment
#[derive(Parser, Debug)]
#[command(name = "configure")]
#[command(
    about = "Use this script for configuring SSM parameters for CDK deployment.",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the local cache file
    #[arg(long, env = "PARAMCONF_CACHE_FILE")]
    cache_file: Option<PathBuf>,

    /// Parameter store backend (ssm, memory)
    #[arg(long, env = "PARAMCONF_STORE")]
    store: Option<String>,

    /// AWS region
    #[arg(long)]
    region: Option<String>,

    /// AWS shared-config profile
    #[arg(long)]
    profile: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Definitions decide which flags exist, so they load before parsing
    let config = AppConfig::load()?;
    let params = config.load_params()?;

    let command = commands::build_command(Cli::command(), &params)?;
    let matches = command.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.cache_file,
        cli.store,
        cli.region,
        cli.profile,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );
    config.validate()?;

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("paramconf starting for {}", params.app_name());
    tracing::debug!("Definitions: {:?}", config.params_file);
    tracing::debug!("Cache: {:?}", config.cache_file);
    tracing::debug!("Store: {}", config.store);

    let _span = tracing::info_span!("command", name = "configure").entered();

    let store = create_store(&config.store, &StoreOptions::from_config(&config)).await?;
    let configurator = Configurator::new(params, store, CacheFile::new(&config.cache_file));
    let mode = commands::select_mode(&matches, &configurator);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = configurator
        .run(mode, &mut stdin.lock(), &mut stdout.lock())
        .await;

    // Log completion
    match &result {
        Ok(Outcome::Applied { report, .. }) if !report.is_complete() => {
            tracing::warn!("{} parameters could not be stored", report.failed.len())
        }
        Ok(Outcome::Aborted(_)) => tracing::info!("No parameters supplied"),
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result.map(|_| ())
}
