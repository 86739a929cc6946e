use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_client;
mod config;
mod console;
mod handlers;
mod services;
mod sessions;
mod state;
mod views;

use api_client::PromotionClient;
use config::ConsoleConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promotion_console=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::load();
    tracing::info!("Promotion console starting...");
    tracing::info!("Promotion service: {}", config.service_url);
    tracing::info!("Request timeout: {}s", config.request_timeout_secs);
    tracing::info!("Session idle timeout: {}s", config.session_idle_secs);

    let client = PromotionClient::new(&config.service_url, config.request_timeout())
        .context("Failed to initialize promotion service client")?;
    let state = AppState::new(config.clone(), Arc::new(client));

    let app = handlers::router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("Console listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
