//! CLI command definitions for the `oncochat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod models;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use oncochat_infra::config::DEFAULT_CONFIG_FILE;

/// Cancer care chat assistant backend.
#[derive(Parser)]
#[command(name = "oncochat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "ONCOCHAT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to (overrides the config file).
        #[arg(long)]
        host: Option<String>,

        /// Directory of static frontend files (overrides the config file).
        #[arg(long, env = "ONCOCHAT_WEB_DIR")]
        web_dir: Option<String>,
    },

    /// List the models visible to the configured API key.
    Models,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,oncochat_api=debug,oncochat_core=debug,oncochat_infra=debug",
            _ => "trace",
        }
    }
}
