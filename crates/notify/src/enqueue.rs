//! The producer side: durably enqueue notification intents.

use fleet_core::kind::{NotificationKind, UnknownKind};
use fleet_core::types::DbId;
use fleet_db::models::notification::Notification;
use serde::Serialize;
use uuid::Uuid;

use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error returned by [`NotificationProducer::enqueue`].
#[derive(Debug, thiserror::Error)]
pub enum EnqueueError {
    /// The kind name does not match any known [`NotificationKind`];
    /// nothing was persisted.
    #[error(transparent)]
    InvalidKind(#[from] UnknownKind),

    /// The payload could not be serialized; nothing was persisted.
    #[error("Payload serialization failed: {0}")]
    Payload(#[from] serde_json::Error),

    /// The record insert failed.
    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// NotificationProducer
// ---------------------------------------------------------------------------

/// Validates and persists notification intents.
///
/// Enqueue and delivery are fully decoupled in time and failure domain:
/// this performs exactly one store insert and never attempts delivery.
pub struct NotificationProducer<S> {
    store: S,
}

impl<S: RecordStore> NotificationProducer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a `Pending` record for `user_id` and return its ID.
    ///
    /// `kind_name` must match a [`NotificationKind`] name exactly
    /// (case-sensitive). The payload is serialized once here; its shape is a
    /// contract between the caller and whichever formatter claims the kind.
    pub async fn enqueue<P>(
        &self,
        user_id: DbId,
        kind_name: &str,
        payload: &P,
    ) -> Result<Uuid, EnqueueError>
    where
        P: Serialize + ?Sized,
    {
        let kind: NotificationKind = kind_name.parse()?;
        let payload = serde_json::to_value(payload)?;

        let record = Notification::pending(user_id, kind, payload);
        self.store.insert(&record).await?;

        tracing::debug!(id = %record.id, kind = %kind, user_id, "Notification enqueued");
        Ok(record.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::format::payload::PaymentSucceededPayload;

    /// In-memory [`RecordStore`] capturing inserts.
    #[derive(Default)]
    struct MemStore {
        records: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl RecordStore for MemStore {
        async fn insert(&self, record: &Notification) -> Result<(), sqlx::Error> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn update(&self, _record: &Notification) -> Result<(), sqlx::Error> {
            Err(sqlx::Error::RowNotFound)
        }

        async fn fetch_pending(&self) -> Result<Vec<Notification>, sqlx::Error> {
            Ok(self.records.lock().unwrap().clone())
        }
    }

    fn payment_payload() -> serde_json::Value {
        serde_json::json!({
            "reservation_id": uuid::Uuid::now_v7(),
            "total_amount": 120.00,
            "late_fee": 0.0,
            "payment_gateway": "stripe",
            "transaction_id": "tx-001",
        })
    }

    #[tokio::test]
    async fn enqueue_creates_a_pending_record_whose_payload_round_trips() {
        let producer = NotificationProducer::new(MemStore::default());

        let id = producer
            .enqueue(1, "PaymentSucceeded", &payment_payload())
            .await
            .expect("enqueue should succeed");

        let records = producer.store.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, id);
        assert_eq!(record.user_id, 1);
        assert_eq!(record.kind, "PaymentSucceeded");
        assert!(record.is_pending());
        assert!(record.sent_at.is_none());

        let payload: PaymentSucceededPayload =
            serde_json::from_value(record.payload.clone()).expect("payload should round-trip");
        assert_eq!(payload.total_amount, 120.00);
        assert_eq!(payload.payment_gateway, "stripe");
    }

    #[tokio::test]
    async fn unknown_kind_is_rejected_and_nothing_is_persisted() {
        let producer = NotificationProducer::new(MemStore::default());

        let result = producer
            .enqueue(1, "NotARealKind", &serde_json::json!({}))
            .await;

        assert_matches!(result, Err(EnqueueError::InvalidKind(_)));
        assert!(producer.store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn kind_matching_is_case_sensitive() {
        let producer = NotificationProducer::new(MemStore::default());

        let result = producer
            .enqueue(1, "paymentSucceeded", &serde_json::json!({}))
            .await;

        assert_matches!(result, Err(EnqueueError::InvalidKind(_)));
        assert!(producer.store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn structured_payloads_are_serialized_at_enqueue_time() {
        let producer = NotificationProducer::new(MemStore::default());
        let payload = PaymentSucceededPayload {
            reservation_id: uuid::Uuid::now_v7(),
            total_amount: 89.50,
            late_fee: 12.25,
            payment_gateway: "mercadopago".to_string(),
            transaction_id: "tx-002".to_string(),
        };

        producer
            .enqueue(4, "PaymentSucceeded", &payload)
            .await
            .expect("enqueue should succeed");

        let records = producer.store.records.lock().unwrap();
        assert_eq!(records[0].payload["late_fee"], 12.25);
    }
}
