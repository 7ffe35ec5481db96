//! Payload shapes owned by the specific formatters.
//!
//! Each shape is a contract between the producer that enqueues a kind and
//! the formatter that claims it. The engine itself never interprets a
//! payload; it is deserialized lazily, only when a matching formatter
//! renders the record.

use fleet_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for `ReservationCreated` and `ReservationConfirmed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationPayload {
    pub reservation_id: Uuid,
    pub pickup_branch_name: String,
    pub drop_off_branch_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

/// Payload for `VehiclePickedUp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickedUpPayload {
    pub reservation_id: Uuid,
    pub pickup_branch_name: String,
    pub drop_off_branch_name: String,
    pub actual_pickup_time: Timestamp,
    pub end_time: Timestamp,
}

/// Payload for `VehicleReturned`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnedPayload {
    pub reservation_id: Uuid,
    pub pickup_branch_name: String,
    pub drop_off_branch_name: String,
    pub actual_pickup_time: Timestamp,
    pub actual_return_time: Timestamp,
}

/// Payload for `PaymentSucceeded`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSucceededPayload {
    pub reservation_id: Uuid,
    pub total_amount: f64,
    pub late_fee: f64,
    pub payment_gateway: String,
    pub transaction_id: String,
}
