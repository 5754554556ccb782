//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration inspector for environment and property-file settings
#[derive(Parser)]
#[command(
    name = "envconf",
    version,
    about = "Configuration inspector for environment and property-file settings",
    long_about = "Resolves dotted property keys against application property files \
                  (.properties, .yaml, .json, .toml) and environment variables, \
                  with typed coercion and defaulting."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory for configuration files
    #[arg(long, short = 'd', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Additional configuration file to load (repeatable, later wins)
    #[arg(long, short = 'f', global = true)]
    pub file: Vec<PathBuf>,

    /// Do not ingest environment variables
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a property key to a typed value (alias: resolve)
    #[command(alias = "resolve")]
    Get {
        /// Dotted property key, e.g. "env.test1.test-of-env-int1"
        key: String,

        /// Target type (string, boolean, integer, long, float, double, character)
        #[arg(long, short = 't', default_value = "string")]
        r#type: String,

        /// Fallback value when the key is absent
        #[arg(long)]
        default: Option<String>,
    },
    /// List all resolved properties
    List {
        /// Only show keys under this prefix
        #[arg(long, short = 'p')]
        prefix: Option<String>,
    },
    /// Show which configuration files were loaded, in load order
    Sources,
    /// Validate that all configuration sources load and parse
    Check,
    /// Display version information
    Version,
}
