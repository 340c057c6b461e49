//! dataset-catalog - measurement-log catalog and GPS trajectory extractor
//!
//! A CLI tool that lists uploaded measurement-log files together with the
//! metadata encoded in their names, and extracts GPS trajectories from
//! their contents.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, config, missing dataset, etc.)

mod catalog;
mod cli;
mod config;
mod error;
mod filename;
mod models;
mod report;
mod scanner;
mod trajectory;

use anyhow::{Context, Result};
use catalog::Catalog;
use cli::{Args, Command, OutputFormat};
use config::Config;
use error::Degraded;
use trajectory::TrajectoryExtractor;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if args.command == Command::InitConfig {
        return handle_init_config();
    }

    // Load configuration before logging so it can raise the level
    let config = match load_config(&args) {
        Ok(mut config) => {
            config.merge_with_args(&args);
            config
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    debug!("dataset-catalog v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args, &config) {
        error!("Command failed: {}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .dataset-catalog.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", config::CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the selected command against the configured catalog.
fn run(args: &Args, config: &Config) -> Result<()> {
    let catalog = Catalog::new(&config.catalog.directory, config.catalog.create_if_missing);
    let extractor = TrajectoryExtractor::from(&config.trajectory);
    info!("Catalog at: {}", catalog.root().display());

    match args.command {
        Command::List { ref sort, desc } => {
            let listing = match sort {
                Some(key) => catalog.list_sorted(key, !desc),
                None => catalog.list(!desc),
            };
            let output = match args.format {
                OutputFormat::Json => report::generate_json_report(&listing.value)?,
                OutputFormat::Text => report::generate_catalog_table(&listing.value),
            };
            println!("{}", output);
            report_degraded(&listing);
        }
        Command::Path { ref name } => {
            let path = catalog
                .resolve_path(name)
                .with_context(|| format!("No catalog path for {}", name))?;
            println!("{}", path.display());
        }
        Command::Trajectory { ref name } => {
            let points = trajectory::extract_trajectory(&catalog, &extractor, name)
                .with_context(|| format!("Failed to extract trajectory of {}", name))?;
            let output = match args.format {
                OutputFormat::Json => report::generate_json_report(&points)?,
                OutputFormat::Text => report::render_points(&points),
            };
            println!("{}", output);
        }
        Command::Trajectories => {
            let result = trajectory::extract_all_trajectories(&catalog, &extractor);
            let output = match args.format {
                OutputFormat::Json => report::generate_json_report(&result.value)?,
                OutputFormat::Text => report::render_aggregate(&result.value),
            };
            println!("{}", output);
            debug!("{} points in total", trajectory::total_points(&result.value));
            report_degraded(&result);
        }
        Command::Import { ref file } => {
            let target = catalog
                .import(file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("{}", target.display());
        }
        Command::InitConfig => return handle_init_config(),
    }

    Ok(())
}

/// Each warning was already logged when recorded; only summarize here.
fn report_degraded<T>(result: &Degraded<T>) {
    if !result.is_clean() {
        info!("{} warnings while building the result", result.warnings.len());
    }
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is initialized.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            // Logging is not set up yet.
            eprintln!("Warning: failed to load config, using defaults: {:#}", e);
            Ok(Config::default())
        }
    }
}
