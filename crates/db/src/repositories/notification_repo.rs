//! Repository for the `notifications` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::models::status::NotificationStatus;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, user_id, kind, status_id, payload, created_at, sent_at, failure_reason";

/// Provides CRUD operations for notification records.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a fully built record. The caller assigns the ID and timestamps
    /// (see `Notification::pending`).
    pub async fn insert(pool: &PgPool, record: &Notification) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notifications \
                 (id, user_id, kind, status_id, payload, created_at, sent_at, failure_reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.kind)
        .bind(record.status_id)
        .bind(&record.payload)
        .bind(record.created_at)
        .bind(record.sent_at)
        .bind(&record.failure_reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Persist the mutable delivery outcome of a record.
    ///
    /// `kind`, `payload`, and `created_at` are written once at insert and
    /// never updated.
    pub async fn update(pool: &PgPool, record: &Notification) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notifications \
             SET status_id = $2, sent_at = $3, failure_reason = $4 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(record.status_id)
        .bind(record.sent_at)
        .bind(&record.failure_reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch every record still awaiting delivery, oldest first.
    pub async fn fetch_pending(pool: &PgPool) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE status_id = $1 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(NotificationStatus::Pending.id())
            .fetch_all(pool)
            .await
    }

    /// Find a record by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
