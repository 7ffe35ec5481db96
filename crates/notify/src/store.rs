//! Ports onto the record store and the recipient directory.
//!
//! The dispatch loop and the enqueue producer only ever talk to these
//! traits; [`PgRecordStore`] and [`PgRecipientLookup`] adapt them onto the
//! `fleet-db` repositories for production use.

use std::sync::Arc;

use async_trait::async_trait;
use fleet_core::types::DbId;
use fleet_db::models::notification::Notification;
use fleet_db::repositories::{NotificationRepo, UserRepo};
use fleet_db::DbPool;

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Recipient details resolved from a user id.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub id: DbId,
    /// Display name used when addressing the recipient in a message body.
    pub name: String,
    /// Delivery address handed to the transport.
    pub email: String,
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Durable storage for notification records.
///
/// The enqueue producer is the only caller of `insert`; the dispatch loop is
/// the only caller of `update`. Records are never deleted through this port.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a freshly built record.
    async fn insert(&self, record: &Notification) -> Result<(), sqlx::Error>;

    /// Persist a record's delivery outcome.
    async fn update(&self, record: &Notification) -> Result<(), sqlx::Error>;

    /// All records currently awaiting delivery, in store order.
    async fn fetch_pending(&self) -> Result<Vec<Notification>, sqlx::Error>;
}

/// Resolves a user id to recipient details.
#[async_trait]
pub trait RecipientLookup: Send + Sync {
    /// Returns `None` when no such user exists.
    async fn recipient_by_id(&self, user_id: DbId) -> Result<Option<Recipient>, sqlx::Error>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn insert(&self, record: &Notification) -> Result<(), sqlx::Error> {
        (**self).insert(record).await
    }

    async fn update(&self, record: &Notification) -> Result<(), sqlx::Error> {
        (**self).update(record).await
    }

    async fn fetch_pending(&self) -> Result<Vec<Notification>, sqlx::Error> {
        (**self).fetch_pending().await
    }
}

#[async_trait]
impl<L: RecipientLookup + ?Sized> RecipientLookup for Arc<L> {
    async fn recipient_by_id(&self, user_id: DbId) -> Result<Option<Recipient>, sqlx::Error> {
        (**self).recipient_by_id(user_id).await
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL adapters
// ---------------------------------------------------------------------------

/// [`RecordStore`] backed by the `notifications` table.
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: &Notification) -> Result<(), sqlx::Error> {
        NotificationRepo::insert(&self.pool, record).await
    }

    async fn update(&self, record: &Notification) -> Result<(), sqlx::Error> {
        NotificationRepo::update(&self.pool, record).await
    }

    async fn fetch_pending(&self) -> Result<Vec<Notification>, sqlx::Error> {
        NotificationRepo::fetch_pending(&self.pool).await
    }
}

/// [`RecipientLookup`] backed by the `users` table.
pub struct PgRecipientLookup {
    pool: DbPool,
}

impl PgRecipientLookup {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipientLookup for PgRecipientLookup {
    async fn recipient_by_id(&self, user_id: DbId) -> Result<Option<Recipient>, sqlx::Error> {
        let user = UserRepo::find_by_id(&self.pool, user_id).await?;
        Ok(user.map(|user| Recipient {
            id: user.id,
            name: user.full_name(),
            email: user.email,
        }))
    }
}
