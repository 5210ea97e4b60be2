//! Process entry point.
//!
//! Three modes, selected by flags:
//! - default: serve jobs with a bounded worker pool until SIGINT/SIGTERM
//! - `-p`/`--produce`: submit synthetic job batches on a fixed cadence
//! - `-g`/`--migrate`: apply queue schema migrations and exit
//!
//! Exits 0 on clean completion or a signal-driven shutdown, 1 on any fatal
//! error.

mod cli;
mod config;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use queuebench_jobs::{
    build_queue, create_pool, Error as JobsError, Producer, QueueSubmitter, WelcomeEmailTask,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use underway::Worker;

use crate::cli::{Cli, Mode};
use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Jobs(#[from] JobsError),
    #[error("worker failed: {0}")]
    Worker(#[from] underway::worker::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::default();

    match run(cli.mode(), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("queuebench=debug,queuebench_jobs=debug,underway=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mode: Mode, config: &AppConfig) -> Result<(), AppError> {
    let pool = create_pool(&config.database_url, config.pool.clone()).await?;

    match mode {
        Mode::Migrate => {
            underway::run_migrations(&pool)
                .await
                .map_err(JobsError::Migrate)?;
            info!("Migrations applied");
        }
        Mode::Produce => {
            let queue = build_queue(&pool).await?;
            let submitter = Arc::new(QueueSubmitter::new(queue));
            let producer = Arc::new(Producer::new(submitter, pool, config.producer.clone()));

            let shutdown = CancellationToken::new();
            spawn_signal_handler(shutdown.clone());

            producer.run(shutdown).await;
            info!("Producer shut down");
        }
        Mode::Serve => {
            let queue = build_queue(&pool).await?;
            let mut worker = Worker::new(queue.into(), WelcomeEmailTask);
            worker.set_concurrency_limit(config.worker_concurrency);

            let shutdown = CancellationToken::new();
            worker.set_shutdown_token(shutdown.clone());
            spawn_signal_handler(shutdown);

            info!(
                concurrency = config.worker_concurrency,
                "Serving jobs from the welcome-email queue"
            );
            worker.run().await?;
            info!("Worker shut down");
        }
    }

    Ok(())
}

/// Cancel the token on SIGINT or SIGTERM.
///
/// If signal registration itself fails the token is cancelled immediately:
/// better to stop than to run without any way to request shutdown.
fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match wait_for_shutdown().await {
            Ok(signal) => info!(signal, "Shutdown signal received"),
            Err(err) => error!(error = %err, "Cannot listen for shutdown signals"),
        }
        shutdown.cancel();
    });
}

async fn wait_for_shutdown() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}
