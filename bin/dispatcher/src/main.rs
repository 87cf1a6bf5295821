//! Dispatcher service entry point.

mod app;
mod config;
mod firing;
mod triggers;

use config::DispatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tradebeat_dispatch::Dispatcher;
use tradebeat_network::NetworkBoundary;
use tradebeat_remote::HttpRemoteClient;
use tradebeat_secrets::HttpSecretResolver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = DispatcherConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Declare and audit-log the egress table
    let boundary = NetworkBoundary::production();
    for destination in boundary.paths() {
        tracing::info!(%destination, "egress path declared");
    }

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("failed to build http client");

    let resolver = Arc::new(HttpSecretResolver::new(
        http.clone(),
        config.secret_store_url.clone(),
        boundary.clone(),
    ));
    let client = Arc::new(HttpRemoteClient::new(
        http,
        config.backend_base_url.clone(),
        config.api_key_header.clone(),
        timeout,
        boundary,
    ));
    let dispatcher = Arc::new(Dispatcher::new(
        resolver,
        client,
        config.api_key_secret_name.clone(),
    ));

    // Spawn the in-process firing loop when triggers are provisioned
    if let Some(path) = &config.triggers_file {
        let registry = triggers::load(path).expect("failed to load trigger file");
        tracing::info!(triggers = registry.len(), "starting in-process firing loop");
        firing::spawn(&registry, &dispatcher);
    }

    let app = app::router(app::AppState { dispatcher });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutting down");
}
