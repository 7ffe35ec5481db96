//! The dispatch loop: turns `Pending` records into `Sent`/`Failed` outcomes.
//!
//! A single cooperative background worker polls the record store on a fixed
//! interval. Within a tick, records are processed strictly sequentially, one
//! delivery at a time, and one record's failure never aborts the rest of the
//! tick.
//!
//! Delivery is attempted before the outcome is persisted, so a crash between
//! the two leaves the record pending and it is redelivered on a later tick:
//! the engine is at-least-once, never at-most-once.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use fleet_core::kind::NotificationKind;
use fleet_db::models::notification::Notification;

use crate::delivery::{Transport, TransportError};
use crate::format::{FormatterRegistry, RenderError};
use crate::store::{Recipient, RecipientLookup, RecordStore};

/// Default interval between polling ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Why a record failed to reach `Sent` during a tick.
#[derive(Debug, thiserror::Error)]
enum DeliveryError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Terminal result of processing one record within a tick.
enum Outcome {
    Sent,
    Failed,
    /// The record was left pending (recipient not found) and will be
    /// revisited on the next tick.
    LeftPending,
}

// ---------------------------------------------------------------------------
// TickStats
// ---------------------------------------------------------------------------

/// Counters for one dispatch tick.
///
/// Records whose outcome could not be persisted are only counted in
/// `fetched`; the store error is logged and they stay pending in the
/// database.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickStats {
    /// Records fetched as pending at the start of the tick.
    pub fetched: usize,
    pub sent: usize,
    pub failed: usize,
    /// Records left pending because their recipient could not be resolved.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// NotificationDispatcher
// ---------------------------------------------------------------------------

/// Background service that delivers pending notification records.
pub struct NotificationDispatcher<S, L, T> {
    store: S,
    lookup: L,
    registry: FormatterRegistry,
    transport: T,
    poll_interval: Duration,
}

impl<S, L, T> NotificationDispatcher<S, L, T>
where
    S: RecordStore,
    L: RecipientLookup,
    T: Transport,
{
    pub fn new(
        store: S,
        lookup: L,
        registry: FormatterRegistry,
        transport: T,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            lookup,
            registry,
            transport,
            poll_interval,
        }
    }

    /// Run the dispatch loop until `cancel` is triggered.
    ///
    /// Cancellation is checked between ticks only: a tick in progress
    /// finishes every record it fetched before the loop exits, and an
    /// in-flight delivery attempt is never aborted.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notification dispatcher cancelled");
                    break;
                }
                _ = interval.tick() => {
                    match self.tick().await {
                        Ok(stats) if stats.fetched > 0 => {
                            tracing::info!(
                                fetched = stats.fetched,
                                sent = stats.sent,
                                failed = stats.failed,
                                skipped = stats.skipped,
                                "Dispatch tick complete"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to fetch pending notifications");
                        }
                    }
                }
            }
        }
    }

    /// Execute one fetch-render-deliver-persist pass over the pending set.
    ///
    /// The fetch is unbounded; every currently pending record is visited in
    /// store order within this tick.
    pub async fn tick(&self) -> Result<TickStats, sqlx::Error> {
        let pending = self.store.fetch_pending().await?;
        let mut stats = TickStats {
            fetched: pending.len(),
            ..TickStats::default()
        };

        for mut record in pending {
            match self.process(&mut record).await {
                Ok(Outcome::Sent) => stats.sent += 1,
                Ok(Outcome::Failed) => stats.failed += 1,
                Ok(Outcome::LeftPending) => stats.skipped += 1,
                // A store failure aborts this record's write only; the
                // record stays pending in the database and is retried on a
                // later tick.
                Err(e) => {
                    tracing::error!(
                        id = %record.id,
                        error = %e,
                        "Failed to persist notification outcome"
                    );
                }
            }
        }

        Ok(stats)
    }

    /// Deliver a single record and persist its outcome.
    async fn process(&self, record: &mut Notification) -> Result<Outcome, sqlx::Error> {
        let recipient = match self.lookup.recipient_by_id(record.user_id).await? {
            Some(recipient) => recipient,
            None => {
                // Unknown recipient: leave the record pending so the next
                // tick retries it. There is no cutoff, so an orphaned
                // record is retried forever.
                tracing::debug!(
                    id = %record.id,
                    user_id = record.user_id,
                    "Recipient not found, leaving notification pending"
                );
                self.store.update(record).await?;
                return Ok(Outcome::LeftPending);
            }
        };

        let outcome = match self.deliver(record, &recipient).await {
            Ok(()) => {
                record.mark_sent();
                tracing::info!(
                    id = %record.id,
                    kind = %record.kind,
                    to = %recipient.email,
                    "Notification sent"
                );
                Outcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    id = %record.id,
                    kind = %record.kind,
                    error = %e,
                    "Notification delivery failed"
                );
                record.mark_failed(e.to_string());
                Outcome::Failed
            }
        };

        self.store.update(record).await?;
        Ok(outcome)
    }

    /// Render the record for `recipient` and push it through the transport.
    async fn deliver(
        &self,
        record: &Notification,
        recipient: &Recipient,
    ) -> Result<(), DeliveryError> {
        let kind: NotificationKind = record.kind.parse().map_err(RenderError::from)?;
        let body = self.registry.resolve(kind).render(record, recipient)?;
        self.transport.deliver(&recipient.email, &body).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
