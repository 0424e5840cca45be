use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use realartist_server::app;
use realartist_server::config::{Args, Config};
use realartist_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env(&args)?;
    init_tracing(&config);

    info!(port = config.port, env = %config.env, "starting RealArtist AI server");
    info!(
        window_ms = config.rate_limit_window.as_millis() as u64,
        max_requests = config.rate_limit_max_requests,
        "rate limiter configured"
    );

    let state = Arc::new(AppState::new(config.clone()));
    let router = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    // shutdown is immediate: no drain of in-flight requests
    tokio::select! {
        result = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .into_future() => result?,
        _ = shutdown_signal() => info!("shutdown signal received, exiting"),
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let default_level = if config.is_production() { "info" } else { "debug" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
