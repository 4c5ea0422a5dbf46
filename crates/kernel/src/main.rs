//! Kiosk kernel
//!
//! HTTP server and plugin runtime for the excavation kiosk.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hmlab::HmLabPlugin;
use kiosk_kernel::session::{create_session_layer, same_site_from_config};
use kiosk_kernel::{AppState, Config};
use kiosk_sdk::plugin::KioskPlugin;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting kiosk kernel");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, "Configuration loaded");

    let plugins: Vec<Arc<dyn KioskPlugin>> = vec![Arc::new(HmLabPlugin::new())];

    let session_layer = create_session_layer(same_site_from_config(&config.cookie_same_site));

    let state =
        AppState::new(config.clone(), plugins).context("failed to initialize application")?;
    info!(plugins = state.plugins().len(), "Plugins loaded");

    // Middleware layers (last added = first executed in request flow):
    // TraceLayer → session → routes
    let app = state
        .router()
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
