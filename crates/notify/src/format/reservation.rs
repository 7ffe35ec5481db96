//! Formatters for the reservation lifecycle kinds.

use fleet_core::kind::NotificationKind;
use fleet_db::models::notification::Notification;

use super::payload::{PickedUpPayload, ReservationPayload, ReturnedPayload};
use super::{NotificationFormatter, RenderError};
use crate::store::Recipient;

/// Timestamp format used in reservation message bodies.
const TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Shared body for the created/confirmed pair, which differ only in the
/// headline.
fn reservation_body(recipient: &Recipient, payload: &ReservationPayload, headline: &str) -> String {
    format!(
        "Hi {name},\n\n\
         {headline}\n\n\
         Reservation: {id}\n\
         Pickup: {pickup} on {start}\n\
         Drop-off: {drop_off} on {end}\n\n\
         Thanks for choosing Fleet!",
        name = recipient.name,
        id = payload.reservation_id,
        pickup = payload.pickup_branch_name,
        start = payload.start_time.format(TIME_FORMAT),
        drop_off = payload.drop_off_branch_name,
        end = payload.end_time.format(TIME_FORMAT),
    )
}

/// Renders `ReservationCreated` records.
pub struct ReservationCreatedFormatter;

impl NotificationFormatter for ReservationCreatedFormatter {
    fn can_handle(&self, kind: NotificationKind) -> bool {
        kind == NotificationKind::ReservationCreated
    }

    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError> {
        let payload: ReservationPayload = serde_json::from_value(record.payload.clone())?;
        Ok(reservation_body(
            recipient,
            &payload,
            "Your reservation has been created.",
        ))
    }
}

/// Renders `ReservationConfirmed` records.
pub struct ReservationConfirmedFormatter;

impl NotificationFormatter for ReservationConfirmedFormatter {
    fn can_handle(&self, kind: NotificationKind) -> bool {
        kind == NotificationKind::ReservationConfirmed
    }

    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError> {
        let payload: ReservationPayload = serde_json::from_value(record.payload.clone())?;
        Ok(reservation_body(
            recipient,
            &payload,
            "Your reservation has been confirmed.",
        ))
    }
}

/// Renders `VehiclePickedUp` records.
pub struct VehiclePickedUpFormatter;

impl NotificationFormatter for VehiclePickedUpFormatter {
    fn can_handle(&self, kind: NotificationKind) -> bool {
        kind == NotificationKind::VehiclePickedUp
    }

    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError> {
        let payload: PickedUpPayload = serde_json::from_value(record.payload.clone())?;
        Ok(format!(
            "Hi {name},\n\n\
             Your reservation is now in progress: the vehicle has been picked up.\n\n\
             Reservation: {id}\n\
             Pickup: {pickup}\n\
             Drop-off: {drop_off}\n\
             Picked up at: {picked_up}\n\
             Expected return: {expected}\n\n\
             Safe travels with Fleet!",
            name = recipient.name,
            id = payload.reservation_id,
            pickup = payload.pickup_branch_name,
            drop_off = payload.drop_off_branch_name,
            picked_up = payload.actual_pickup_time.format(TIME_FORMAT),
            expected = payload.end_time.format(TIME_FORMAT),
        ))
    }
}

/// Renders `VehicleReturned` records.
pub struct VehicleReturnedFormatter;

impl NotificationFormatter for VehicleReturnedFormatter {
    fn can_handle(&self, kind: NotificationKind) -> bool {
        kind == NotificationKind::VehicleReturned
    }

    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError> {
        let payload: ReturnedPayload = serde_json::from_value(record.payload.clone())?;
        Ok(format!(
            "Hi {name},\n\n\
             We confirm the vehicle has been returned. Your reservation is now awaiting payment.\n\n\
             Reservation: {id}\n\
             Pickup: {pickup}\n\
             Drop-off: {drop_off}\n\
             Picked up at: {picked_up}\n\
             Returned at: {returned}\n\n\
             To finish up, complete the payment on our platform.\n\n\
             Thanks for riding with Fleet!",
            name = recipient.name,
            id = payload.reservation_id,
            pickup = payload.pickup_branch_name,
            drop_off = payload.drop_off_branch_name,
            picked_up = payload.actual_pickup_time.format(TIME_FORMAT),
            returned = payload.actual_return_time.format(TIME_FORMAT),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn recipient() -> Recipient {
        Recipient {
            id: 1,
            name: "Dana Smith".to_string(),
            email: "dana@example.com".to_string(),
        }
    }

    fn reservation_payload() -> ReservationPayload {
        ReservationPayload {
            reservation_id: Uuid::now_v7(),
            pickup_branch_name: "Airport".to_string(),
            drop_off_branch_name: "Downtown".to_string(),
            start_time: chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            end_time: chrono::Utc.with_ymd_and_hms(2026, 3, 16, 18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn created_body_includes_branches_and_times() {
        let payload = reservation_payload();
        let record = Notification::pending(
            1,
            NotificationKind::ReservationCreated,
            serde_json::to_value(&payload).unwrap(),
        );

        let body = ReservationCreatedFormatter
            .render(&record, &recipient())
            .unwrap();

        assert!(body.contains("Hi Dana Smith"));
        assert!(body.contains("has been created"));
        assert!(body.contains("Airport"));
        assert!(body.contains("Downtown"));
        assert!(body.contains("14/03/2026 09:30"));
        assert!(body.contains("16/03/2026 18:00"));
    }

    #[test]
    fn confirmed_body_differs_only_in_the_headline() {
        let payload = reservation_payload();
        let record = Notification::pending(
            1,
            NotificationKind::ReservationConfirmed,
            serde_json::to_value(&payload).unwrap(),
        );

        let body = ReservationConfirmedFormatter
            .render(&record, &recipient())
            .unwrap();
        assert!(body.contains("has been confirmed"));
        assert!(!body.contains("has been created"));
    }

    #[test]
    fn malformed_payload_is_a_render_error() {
        let record = Notification::pending(
            1,
            NotificationKind::ReservationCreated,
            serde_json::json!({"reservation_id": "not-a-uuid"}),
        );

        let result = ReservationCreatedFormatter.render(&record, &recipient());
        assert!(matches!(result, Err(RenderError::Payload(_))));
    }

    #[test]
    fn each_formatter_claims_exactly_its_own_kind() {
        assert!(VehiclePickedUpFormatter.can_handle(NotificationKind::VehiclePickedUp));
        assert!(!VehiclePickedUpFormatter.can_handle(NotificationKind::VehicleReturned));
        assert!(VehicleReturnedFormatter.can_handle(NotificationKind::VehicleReturned));
        assert!(!VehicleReturnedFormatter.can_handle(NotificationKind::ReservationCreated));
    }
}
