//! Tank Duo screen server
//!
//! Entry point for the shared screen. It handles:
//! - WebSocket connections from phone controllers
//! - WebSocket frame streams for displays
//! - The single authoritative screen session

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tank_duo::app::AppState;
use tank_duo::config::Config;
use tank_duo::game::ScreenSession;
use tank_duo::http::build_router;
use tank_duo::util::time::init_server_time;
use tank_duo::ws::transport::ChannelTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);
    init_server_time();

    info!("Starting Tank Duo screen server");
    info!(
        server_addr = %config.server_addr,
        enemy_count = config.enemy_count,
        world_seed = config.world_seed,
        "Configuration loaded"
    );

    // Spawn the screen session
    let transport = Arc::new(ChannelTransport::new());
    let (session, handle) = ScreenSession::new(config.world(), transport);
    tokio::spawn(session.run());

    let state = AppState::new(config.clone(), handle);
    let router = build_router(state);

    let addr: SocketAddr = config.server_addr;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Controller endpoint: ws://{}/controller", addr);
    info!("Screen endpoint: ws://{}/screen", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        }
    }
}
