//! # farmwatchd — farmwatch daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Connect to the MQTT broker that relays device commands
//! - Seed the configured devices
//! - Build the axum router and serve it until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use farmwatch_adapter_http_axum::router;
use farmwatch_adapter_http_axum::state::AppState;
use farmwatch_adapter_mqtt::MqttCommandPublisher;
use farmwatch_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteActionLog, SqliteDeviceRepository, SqliteReadingRepository,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Broker
    let publisher = MqttCommandPublisher::connect(&config.mqtt);
    tracing::info!(
        host = %config.mqtt.broker_host,
        port = config.mqtt.broker_port,
        "connecting to MQTT broker"
    );

    // Services
    let state = AppState::new(
        SqliteDeviceRepository::new(pool.clone()),
        publisher,
        SqliteActionLog::new(pool.clone()),
        SqliteReadingRepository::new(pool),
        config.farms.clone(),
    );
    for device in config.seed_devices()? {
        let device = state.device_service.upsert_device(device).await?;
        tracing::debug!(device_id = %device.id, "device provisioned");
    }

    // HTTP
    let app = router::build(state, &config.server.static_dir);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "farmwatchd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("farmwatchd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
