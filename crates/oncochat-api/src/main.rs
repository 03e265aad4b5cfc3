//! OncoChat CLI and REST API entry point.
//!
//! Binary name: `oncochat`
//!
//! Loads `.env`, parses CLI arguments, initializes tracing, loads
//! configuration, then dispatches to the requested command.

mod cli;
mod env_file;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use oncochat_infra::config::load_config;
use oncochat_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use env_file::EnvFile;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so `env` fallbacks see values from the file
    let env_file = EnvFile::load();
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "oncochat", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    env_file.log();

    let mut config = load_config(&cli.config).await;

    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            web_dir,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if web_dir.is_some() {
                config.web_dir = web_dir;
            }
            cli::serve::run(config).await
        }

        Commands::Models => cli::models::list_models(&config, cli.json).await,

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}
