//! The mandatory catch-all formatter.

use fleet_core::kind::NotificationKind;
use fleet_db::models::notification::Notification;

use super::{NotificationFormatter, RenderError};
use crate::store::Recipient;

/// Fallback body for kinds without a template.
const GENERIC_BODY: &str = "You have a new notification from Fleet.";

/// Canned one-line bodies for kinds that carry no structured payload.
fn template_for(kind: NotificationKind) -> Option<&'static str> {
    match kind {
        NotificationKind::PaymentSucceeded => Some("We have received your payment."),
        NotificationKind::Reminder => Some("You have an upcoming reservation."),
        NotificationKind::ReservationEndingSoon => {
            Some("Your reservation is about to end. Extend it now to avoid additional charges.")
        }
        NotificationKind::Overdue => {
            Some("You have exceeded your reservation time. Additional charges will apply.")
        }
        _ => None,
    }
}

/// Unconditional formatter consulted last: handles every kind not claimed
/// by a more specific formatter earlier in the registration order.
///
/// A string payload (the `Custom` kind) is treated as a ready-made body and
/// passed through untouched; otherwise a canned template for the kind is
/// used, falling back to a generic line. Rendering never fails.
pub struct DefaultFormatter;

impl NotificationFormatter for DefaultFormatter {
    fn can_handle(&self, _kind: NotificationKind) -> bool {
        true
    }

    fn render(&self, record: &Notification, _recipient: &Recipient) -> Result<String, RenderError> {
        if let serde_json::Value::String(body) = &record.payload {
            if !body.is_empty() {
                return Ok(body.clone());
            }
        }

        let template = record
            .kind
            .parse::<NotificationKind>()
            .ok()
            .and_then(template_for);
        Ok(template.unwrap_or(GENERIC_BODY).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> Recipient {
        Recipient {
            id: 1,
            name: "Dana Smith".to_string(),
            email: "dana@example.com".to_string(),
        }
    }

    #[test]
    fn handles_every_kind() {
        for kind in NotificationKind::ALL {
            assert!(DefaultFormatter.can_handle(kind));
        }
    }

    #[test]
    fn string_payload_is_passed_through_as_the_body() {
        let record = Notification::pending(
            1,
            NotificationKind::Custom,
            serde_json::Value::String("Your branch will close early on Friday.".to_string()),
        );

        let body = DefaultFormatter.render(&record, &recipient()).unwrap();
        assert_eq!(body, "Your branch will close early on Friday.");
    }

    #[test]
    fn templated_kinds_get_their_canned_body() {
        let record =
            Notification::pending(1, NotificationKind::Reminder, serde_json::Value::Null);
        let body = DefaultFormatter.render(&record, &recipient()).unwrap();
        assert_eq!(body, "You have an upcoming reservation.");
    }

    #[test]
    fn unmapped_kinds_fall_back_to_the_generic_line() {
        let record =
            Notification::pending(1, NotificationKind::Custom, serde_json::json!({}));
        let body = DefaultFormatter.render(&record, &recipient()).unwrap();
        assert_eq!(body, GENERIC_BODY);
    }
}
