pub mod api;
pub mod config;
pub mod demo;
pub mod extractor;
pub mod logging;

use anyhow::{Context, Result};
use std::net::SocketAddr;

use api::AppState;
use config::Config;

/// Run the HTTP server until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address))?;

    if !config.simulate_delay {
        tracing::info!("artificial delays disabled");
    }

    let app = api::router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
