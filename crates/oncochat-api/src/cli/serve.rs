//! `oncochat serve`: run the HTTP server until Ctrl+C or SIGTERM.

use anyhow::Result;
use console::style;

use oncochat_core::session::SessionSweeper;
use oncochat_types::config::ServerConfig;

use crate::http;
use crate::state::AppState;

/// Bind, serve, and shut down the idle-session sweeper on exit.
pub async fn run(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let sweep_interval = config.sweep_interval();

    let state = AppState::init(config)?;
    let sweeper = SessionSweeper::start(state.chat_service.sessions().clone(), sweep_interval);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} OncoChat listening on {}",
        style("🚀").bold(),
        style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {} API key configured: {}",
        style("🔑").bold(),
        if state.credential.configured {
            style("yes").green()
        } else {
            style("no").red()
        }
    );
    println!("  {}", style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.shutdown().await;
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
