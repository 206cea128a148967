//! # gatherd — gather reminder daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (TOML file + environment variable overrides)
//! - Initialize structured logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the store and notifier adapters
//! - Construct application services, injecting adapters via port traits
//! - Start the background reminder scheduler
//! - Build the axum router, bind to a TCP port, and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use gather_adapter_http_axum::state::AppState;
use gather_adapter_notifier_log::LogNotifier;
use gather_adapter_storage_sqlite_sqlx::event_repo::SqliteEventStore;
use gather_adapter_storage_sqlite_sqlx::pool;
use gather_app::scheduler::ReminderScheduler;
use gather_app::services::dispatcher::ReminderDispatcher;
use gather_app::services::selector::UpcomingEventSelector;
use gather_app::services::verifier::RegistrationVerifier;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = pool::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Adapters
    let verifier_store = SqliteEventStore::new(pool.clone());
    let dispatcher_store = SqliteEventStore::new(pool.clone());
    let read_store = SqliteEventStore::new(pool);

    // Services
    let verifier = Arc::new(RegistrationVerifier::new(verifier_store, LogNotifier::new()));
    let dispatcher = Arc::new(ReminderDispatcher::new(
        UpcomingEventSelector::new(dispatcher_store),
        LogNotifier::new(),
    ));

    // Background scheduler
    let scheduler_handle = if config.scheduler.enabled {
        let scheduler =
            ReminderScheduler::new(Arc::clone(&dispatcher), config.scheduler_config());
        Some(scheduler.start())
    } else {
        tracing::info!("reminder scheduler disabled by configuration");
        None
    };

    // HTTP
    let state = AppState::from_arcs(verifier, dispatcher, Arc::new(read_store));
    let app = gather_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "gatherd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = scheduler_handle {
        handle.stop().await;
    }
    tracing::info!("gatherd stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
