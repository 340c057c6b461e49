//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dataset-catalog - browse measurement-log uploads and their GPS tracks
///
/// Lists the dataset files of a catalog directory with the metadata encoded
/// in their names, and extracts GPS trajectories from their contents.
///
/// Examples:
///   dataset-catalog list
///   dataset-catalog list --sort fileSize --desc
///   dataset-catalog --dir ./uploads trajectory walk-17_211_1711051829_1711051833.txt
///   dataset-catalog --format json trajectories
///   dataset-catalog init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .dataset-catalog.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Catalog directory (overrides the config file)
    #[arg(short, long, value_name = "DIR", env = "DATASET_CATALOG_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Header lines to skip in each log file (overrides the config file)
    #[arg(long, value_name = "LINES", global = true)]
    pub header_lines: Option<usize>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the datasets of the catalog
    List {
        /// Attribute to sort by
        ///
        /// One of: name, recordNum, recordStartDate, recordEndDate,
        /// uploadDate, fileSize. Defaults to uploadDate.
        #[arg(short, long, value_name = "KEY")]
        sort: Option<String>,

        /// Sort in descending order
        #[arg(long)]
        desc: bool,
    },

    /// Print the path of a dataset
    Path {
        /// Dataset file name
        name: String,
    },

    /// Print the GPS points of one dataset
    Trajectory {
        /// Dataset file name
        name: String,
    },

    /// Print the GPS runs of every dataset, grouped by mode
    Trajectories,

    /// Copy a local file into the catalog
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Generate a default .dataset-catalog.toml configuration file
    InitConfig,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown tables and bracketed lists (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Import { ref file } = self.command {
            if !file.is_file() {
                return Err(format!("Import source is not a file: {}", file.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file;
    /// `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
