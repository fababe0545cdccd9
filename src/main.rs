//! FarmHub Server: multi-tenant farm management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use farmhub_auth::PasswordHasher;
use farmhub_core::config::AppConfig;
use farmhub_core::error::AppError;
use farmhub_database::{DatabasePool, MemoryStore, Repositories};

#[tokio::main]
async fn main() {
    let env = std::env::var("FARMHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FarmHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Data store ───────────────────────────────────────
    let (repos, pool) = if config.database.is_memory() {
        tracing::warn!("Using the in-memory store; data is lost on shutdown");
        (Repositories::memory(MemoryStore::new()), None)
    } else {
        tracing::info!("Connecting to database...");
        let pool = DatabasePool::connect(&config.database).await?;

        if config.database.run_migrations {
            tracing::info!("Running database migrations...");
            farmhub_database::migration::run_migrations(pool.pool()).await?;
            tracing::info!("Database migrations complete");
        }

        (Repositories::postgres(pool.pool().clone()), Some(pool))
    };

    // ── Step 2: Demo data ────────────────────────────────────────
    if config.database.seed {
        tracing::info!("Seeding demo data...");
        farmhub_service::seed(&repos, &PasswordHasher::new()).await?;
    }

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let mut state = farmhub_api::build_state(config, repos);
    if let Some(pool) = &pool {
        state = state.with_database(pool.clone());
    }
    let app = farmhub_api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("FarmHub server listening on {}", addr);

    // ── Step 4: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    tracing::info!("FarmHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
