//! Launchpad CLI
//!
//! Main entry point for the launchpad command-line tool.
//! Browses a capability catalog and drives tile selection end to end.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CategoriesCommand, DismissCommand, ListCommand, SelectCommand, StarCommand};
use launchpad_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Launchpad CLI - capability grid for chat applications
#[derive(Parser, Debug)]
#[command(name = "launchpad")]
#[command(about = "Browse and select capabilities from a catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a capability catalog JSON file
    #[arg(long, global = true, env = "LAUNCHPAD_CATALOG")]
    catalog: Option<PathBuf>,

    /// URL of a capability catalog JSON document
    #[arg(long, global = true, env = "LAUNCHPAD_CATALOG_URL")]
    catalog_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true, env = "LAUNCHPAD_CONFIG")]
    config: Option<PathBuf>,

    /// Display name of the current user
    #[arg(short, long, global = true, env = "LAUNCHPAD_USER")]
    user: Option<String>,

    /// Locale tag of the current user
    #[arg(long, global = true, env = "LAUNCHPAD_LOCALE")]
    locale: Option<String>,

    /// Group identifiers the current user belongs to
    #[arg(long, global = true, env = "LAUNCHPAD_GROUPS", value_delimiter = ',')]
    groups: Option<Vec<String>>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the visible capability tiles
    List(ListCommand),

    /// List the visible categories
    Categories(CategoriesCommand),

    /// Select a capability and emit its prompt
    Select(SelectCommand),

    /// Star or unstar a capability
    Star(StarCommand),

    /// Dismiss the featured tile
    Dismiss(DismissCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.catalog,
        cli.catalog_url,
        cli.config,
        cli.user,
        cli.locale,
        cli.groups,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    // Log startup
    tracing::info!("Launchpad CLI starting");
    tracing::debug!("Catalog file: {:?}", config.catalog_file);
    tracing::debug!("Catalog URL: {:?}", config.catalog_url);
    tracing::debug!("Groups: {:?}", config.groups);

    config.validate()?;

    // Ensure the preferences directory exists
    config.ensure_data_dir()?;

    // Emit command.start span
    let command_name = match &cli.command {
        Commands::List(_) => "list",
        Commands::Categories(_) => "categories",
        Commands::Select(_) => "select",
        Commands::Star(_) => "star",
        Commands::Dismiss(_) => "dismiss",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::List(cmd) => cmd.execute(&config).await,
        Commands::Categories(cmd) => cmd.execute(&config).await,
        Commands::Select(cmd) => cmd.execute(&config).await,
        Commands::Star(cmd) => cmd.execute(&config),
        Commands::Dismiss(cmd) => cmd.execute(&config),
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
