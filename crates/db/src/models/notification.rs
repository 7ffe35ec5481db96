//! Notification record model.

use fleet_core::kind::NotificationKind;
use fleet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{NotificationStatus, StatusId};

/// A row from the `notifications` table: a persisted intent to inform a
/// user of a domain event.
///
/// Records are created by the enqueue producer, mutated only by the dispatch
/// loop, and never deleted by the engine (retention is an external concern).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: DbId,
    /// Canonical [`NotificationKind`] name; validated at enqueue time.
    pub kind: String,
    pub status_id: StatusId,
    /// Opaque event payload. Its schema is a contract between the producer
    /// and the formatter that claims `kind`; written once at creation.
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
    /// Set exactly when the record transitions to `Sent`.
    pub sent_at: Option<Timestamp>,
    /// One-line diagnostic recorded when the record transitions to `Failed`.
    pub failure_reason: Option<String>,
}

impl Notification {
    /// Build a fresh `Pending` record for the given user and kind, with a
    /// newly generated ID and the current time as `created_at`.
    pub fn pending(user_id: DbId, kind: NotificationKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            kind: kind.as_str().to_string(),
            status_id: NotificationStatus::Pending.id(),
            payload,
            created_at: chrono::Utc::now(),
            sent_at: None,
            failure_reason: None,
        }
    }

    /// The parsed delivery status, or `None` for an out-of-range column value.
    pub fn status(&self) -> Option<NotificationStatus> {
        NotificationStatus::from_id(self.status_id)
    }

    pub fn is_pending(&self) -> bool {
        self.status_id == NotificationStatus::Pending.id()
    }

    /// Record a successful delivery. `Sent` is terminal; the dispatch loop
    /// never revisits the record afterwards.
    pub fn mark_sent(&mut self) {
        self.status_id = NotificationStatus::Sent.id();
        self.sent_at = Some(chrono::Utc::now());
    }

    /// Record a failed delivery attempt. `Failed` is terminal; no retry is
    /// scheduled for the record.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        self.status_id = NotificationStatus::Failed.id();
        self.failure_reason = Some(reason.into());
    }
}
