//! Formatter for payment kinds.

use fleet_core::kind::NotificationKind;
use fleet_db::models::notification::Notification;

use super::payload::PaymentSucceededPayload;
use super::{NotificationFormatter, RenderError};
use crate::store::Recipient;

/// Renders `PaymentSucceeded` records.
pub struct PaymentSucceededFormatter;

impl NotificationFormatter for PaymentSucceededFormatter {
    fn can_handle(&self, kind: NotificationKind) -> bool {
        kind == NotificationKind::PaymentSucceeded
    }

    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError> {
        let payload: PaymentSucceededPayload = serde_json::from_value(record.payload.clone())?;
        Ok(format!(
            "Hi {name},\n\n\
             Your payment has been processed successfully.\n\n\
             Reservation: {id}\n\
             Total amount: ${total:.2}\n\
             Late fee: ${late_fee:.2}\n\
             Gateway: {gateway}\n\
             Transaction: {transaction}\n\n\
             Thanks for your payment!",
            name = recipient.name,
            id = payload.reservation_id,
            total = payload.total_amount,
            late_fee = payload.late_fee,
            gateway = payload.payment_gateway,
            transaction = payload.transaction_id,
        ))
    }
}
