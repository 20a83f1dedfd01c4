//! ShareSync remote share synchronization worker
//!
//! Main entry point that wires all crates together and runs the share worker.

mod cli;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, fmt};

use sharesync_core::config::{AppConfig, LoggingConfig};
use sharesync_core::error::AppError;
use sharesync_core::events::EventBus;
use sharesync_database::DatabasePool;
use sharesync_database::repositories::{AccountRepository, FileShareRepository};
use sharesync_storage::{ThumbnailGenerator, WebDavConnector};
use sharesync_worker::{CronScheduler, ExecutionGate, ShareWorker};

use cli::{Cli, Commands};

/// How long shutdown waits for an in-flight run to observe cancellation.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config_dir, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!(config_dir = %cli.config_dir, env = %cli.env, "Configuration loaded");

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("ShareSync error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = fmt().with_env_filter(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().flatten_event(true).with_current_span(false).init();
    } else {
        builder.pretty().with_thread_names(true).init();
    }
}

async fn run(command: Commands, config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ShareSync v{}", env!("CARGO_PKG_VERSION"));

    // Migrations run at startup when enabled, or alone for `migrate`.
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations || command == Commands::Migrate {
        sharesync_database::migration::run_migrations(db.pool()).await?;
    }

    let result = match command {
        Commands::Migrate => Ok(()),
        Commands::Once => run_once(&config, &db).await,
        Commands::Run => run_scheduled(&config, &db).await,
    };

    db.close().await;
    result
}

/// Run the share worker a single time, canceling it on Ctrl+C.
async fn run_once(config: &AppConfig, db: &DatabasePool) -> Result<(), AppError> {
    let (worker, events) = build_worker(config, db).await?;
    let logger = spawn_event_logger(&events);

    let gate = Arc::clone(worker.gate());
    let interrupt = tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, canceling share run...");
        gate.cancel();
    });

    let result = worker.start().await;
    interrupt.abort();
    logger.abort();

    let report = result?;
    tracing::info!(
        uploaded = report.uploaded,
        upload_failed = report.upload_failed,
        demoted = report.demoted,
        removed = report.removed,
        remove_failed = report.remove_failed,
        skipped = report.skipped,
        save_failed = report.save_failed,
        canceled = report.canceled,
        "Share run finished"
    );
    Ok(())
}

/// Run the share worker on its cron schedule until a shutdown signal.
async fn run_scheduled(config: &AppConfig, db: &DatabasePool) -> Result<(), AppError> {
    let (worker, events) = build_worker(config, db).await?;
    let logger = spawn_event_logger(&events);
    let gate = Arc::clone(worker.gate());

    let mut scheduler = CronScheduler::new().await?;
    scheduler
        .register_share_sync(Arc::clone(&worker), &config.worker.share)
        .await?;
    scheduler.start().await?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    if !scheduler.shutdown_gracefully(&gate, DRAIN_TIMEOUT).await? {
        tracing::warn!(drain = ?DRAIN_TIMEOUT, "Share run still active, exiting anyway");
    }

    logger.abort();
    tracing::info!("ShareSync shut down gracefully");
    Ok(())
}

async fn build_worker(
    config: &AppConfig,
    db: &DatabasePool,
) -> Result<(Arc<ShareWorker>, EventBus), AppError> {
    create_data_directories(config).await?;

    let accounts = Arc::new(AccountRepository::new(db.pool().clone()));
    let shares = Arc::new(FileShareRepository::new(
        db.pool().clone(),
        config.worker.share.batch_size,
    ));
    let connector = Arc::new(WebDavConnector::new(&config.remote)?);
    let thumbnails = Arc::new(ThumbnailGenerator::new(&config.storage.thumbnails_path));
    let events = EventBus::default();

    let worker = ShareWorker::new(
        Arc::new(ExecutionGate::new("share")),
        accounts,
        shares,
        connector,
        thumbnails,
        events.clone(),
        &config.storage.originals_path,
    );

    Ok((Arc::new(worker), events))
}

/// Create required data directories
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let dir = Path::new(&config.storage.thumbnails_path);
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        AppError::internal(format!("Failed to create dir '{}': {}", dir.display(), e))
    })?;

    if !Path::new(&config.storage.originals_path).is_dir() {
        tracing::warn!(
            path = %config.storage.originals_path,
            "Originals directory does not exist"
        );
    }
    Ok(())
}

/// Forward domain events to the log.
fn spawn_event_logger(events: &EventBus) -> JoinHandle<()> {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    tracing::debug!(event_id = %event.id, payload = ?event.payload, "Domain event");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
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
}
