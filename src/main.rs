use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coach_planning::adapters::http::{app_router, PlanningAppState};
use coach_planning::adapters::postgres::{self, PostgresPlanningReader, PostgresSessionStore};
use coach_planning::adapters::{ExpirationScheduler, ExpirationSchedulerConfig, SystemClock};
use coach_planning::application::ExpireSessionsHandler;
use coach_planning::config::{AppConfig, ServerConfig};
use coach_planning::ports::Clock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // --- Configuration ---
    let config = AppConfig::load()?;
    config.validate()?;

    // --- Tracing ---
    init_tracing(&config.server);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        environment = ?config.server.environment,
        "Loaded configuration"
    );

    // --- Database ---
    let pool = postgres::connect(&config.database).await?;
    tracing::info!("Database connection pool created");

    let reader = Arc::new(PostgresPlanningReader::new(pool.clone()));
    let store = Arc::new(PostgresSessionStore::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sweep_settings = config.sweeper.to_settings();

    // --- Background expiration ---
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_handle = config.sweeper.interval().map(|interval| {
        let handler = Arc::new(ExpireSessionsHandler::with_settings(
            store.clone(),
            sweep_settings.clone(),
        ));
        let scheduler = ExpirationScheduler::with_config(
            handler,
            clock.clone(),
            ExpirationSchedulerConfig::default().with_interval(interval),
        );
        tokio::spawn(async move { scheduler.run(shutdown_rx).await })
    });
    if scheduler_handle.is_none() {
        tracing::info!("Background expiration disabled");
    }

    // --- Router ---
    let state = PlanningAppState::new(reader, store, clock).with_sweep_settings(sweep_settings);
    let app = app_router(state, &config.server);

    // --- Start server ---
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler_handle {
        if tokio::time::timeout(Duration::from_secs(30), handle).await.is_err() {
            tracing::warn!("Expiration scheduler did not stop in time");
        }
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
