//! `fleet-worker` -- notification dispatch daemon.
//!
//! Polls the `notifications` table for pending records, renders each one
//! through the formatter registry, and delivers it by email (or to the log
//! when SMTP is not configured). Runs until interrupted; an in-progress
//! dispatch tick always completes before shutdown.
//!
//! # Environment variables
//!
//! | Variable                 | Required | Default | Description                              |
//! |--------------------------|----------|---------|------------------------------------------|
//! | `DATABASE_URL`           | yes      | --      | PostgreSQL connection string             |
//! | `DISPATCH_INTERVAL_SECS` | no       | `10`    | Seconds between dispatch ticks           |
//! | `SMTP_HOST`              | no       | --      | SMTP relay; log-only delivery when unset |
//! | `SMTP_PORT`              | no       | `587`   | SMTP relay port                          |
//! | `SMTP_FROM`              | no       | `noreply@fleet.local` | Sender address             |
//! | `SMTP_USER`              | no       | --      | SMTP username                            |
//! | `SMTP_PASSWORD`          | no       | --      | SMTP password                            |

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_notify::{
    default_registry, EmailConfig, EmailTransport, LogTransport, NotificationDispatcher,
    PgRecipientLookup, PgRecordStore, Transport, DEFAULT_POLL_INTERVAL,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet_worker=info,fleet_notify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let pool = fleet_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    fleet_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    fleet_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let poll_interval = std::env::var("DISPATCH_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL);

    let transport: Box<dyn Transport> = match EmailConfig::from_env() {
        Some(config) => {
            tracing::info!(host = %config.smtp_host, "SMTP transport configured");
            Box::new(EmailTransport::new(config))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; notification bodies will be logged, not emailed");
            Box::new(LogTransport)
        }
    };

    let registry = default_registry().expect("Formatter registry is misconfigured");

    let dispatcher = NotificationDispatcher::new(
        PgRecordStore::new(pool.clone()),
        PgRecipientLookup::new(pool),
        registry,
        transport,
        poll_interval,
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            signal_cancel.cancel();
        }
    });

    tracing::info!(
        interval_secs = poll_interval.as_secs(),
        "Starting fleet-worker"
    );
    dispatcher.run(cancel).await;

    tracing::info!("Dispatcher stopped, worker exiting");
}
