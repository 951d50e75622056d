//! # Adverse Server
//!
//! Thin HTTP surface over the adverse event engine. All graph logic lives in
//! `adverse_core`; this crate only decodes requests, routes them to a shared
//! engine and encodes the results.

pub mod api;

use adverse_core::SharedEngine;
use tracing::info;

/// Bind `host:port` and serve the API until the process is stopped.
pub async fn start_server(
    engine: SharedEngine,
    host: &str,
    port: u16,
    allowed_origins: &[String],
) -> anyhow::Result<()> {
    let app = api::create_router(engine, api::cors_layer(allowed_origins));

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(address = %listener.local_addr()?, "adverse event server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
