//! Soloroom server — single-occupancy room lease service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use soloroom_core::config::AppConfig;
use soloroom_core::error::AppError;
use soloroom_service::{LeaseManager, RateLimiter};
use soloroom_store::JsonFileStore;
use soloroom_worker::Sweeper;

#[tokio::main]
async fn main() {
    let env = std::env::var("SOLOROOM_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Soloroom v{}", env!("CARGO_PKG_VERSION"));

    if config.admin.secret.is_empty() {
        tracing::warn!("No admin secret configured, admin endpoints are disabled");
    }

    // ── Step 1: Open the lease store and manager ─────────────────
    let store = Arc::new(JsonFileStore::new(&config.store.path));
    let lease_manager = Arc::new(LeaseManager::open(store, config.lease.clone()).await?);
    tracing::info!(path = %config.store.path, "Lease store opened");

    // ── Step 2: Rate limiter ─────────────────────────────────────
    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

    // ── Step 3: Shutdown channel & sweeper ───────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let sweeper = Sweeper::new(
        Arc::clone(&lease_manager),
        Arc::clone(&rate_limiter),
        &config.lease,
        &config.rate_limit,
    );
    let sweeper_handle = tokio::spawn(async move {
        sweeper.run(shutdown_rx).await;
    });

    // ── Step 4: Build and start HTTP server ──────────────────────
    let state = soloroom_api::AppState {
        config: Arc::new(config.clone()),
        lease_manager,
        rate_limiter,
    };

    let app = soloroom_api::build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Soloroom server listening on {}", addr);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Wait for background tasks ────────────────────────
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), sweeper_handle).await;

    tracing::info!("Soloroom server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
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
