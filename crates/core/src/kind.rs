//! The closed enumeration of notifiable domain events.
//!
//! Every notification record stores one of these kind names. Producers pass
//! the name as a string (e.g. from a message-bus event) and it is validated
//! against this enum before anything is persisted; the formatter registry
//! selects a renderer by matching on the parsed value.

use std::fmt;
use std::str::FromStr;

/// A domain event kind that can be turned into a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    ReservationCreated,
    ReservationConfirmed,
    VehiclePickedUp,
    VehicleReturned,
    PaymentSucceeded,
    Reminder,
    ReservationEndingSoon,
    Overdue,
    /// Free-form notification whose payload carries the message body.
    Custom,
}

/// Error returned when a kind name does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown notification kind: {0}")]
pub struct UnknownKind(pub String);

impl NotificationKind {
    /// Every kind, in declaration order.
    ///
    /// Used by the formatter registry to verify that its final entry is an
    /// unconditional catch-all.
    pub const ALL: [NotificationKind; 9] = [
        NotificationKind::ReservationCreated,
        NotificationKind::ReservationConfirmed,
        NotificationKind::VehiclePickedUp,
        NotificationKind::VehicleReturned,
        NotificationKind::PaymentSucceeded,
        NotificationKind::Reminder,
        NotificationKind::ReservationEndingSoon,
        NotificationKind::Overdue,
        NotificationKind::Custom,
    ];

    /// The canonical name stored in the `notifications.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::ReservationCreated => "ReservationCreated",
            NotificationKind::ReservationConfirmed => "ReservationConfirmed",
            NotificationKind::VehiclePickedUp => "VehiclePickedUp",
            NotificationKind::VehicleReturned => "VehicleReturned",
            NotificationKind::PaymentSucceeded => "PaymentSucceeded",
            NotificationKind::Reminder => "Reminder",
            NotificationKind::ReservationEndingSoon => "ReservationEndingSoon",
            NotificationKind::Overdue => "Overdue",
            NotificationKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    /// Parse a canonical kind name. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for kind in NotificationKind::ALL {
            assert_eq!(kind.as_str().parse::<NotificationKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("paymentSucceeded".parse::<NotificationKind>().is_err());
        assert!("PAYMENTSUCCEEDED".parse::<NotificationKind>().is_err());
        assert_eq!(
            "PaymentSucceeded".parse::<NotificationKind>(),
            Ok(NotificationKind::PaymentSucceeded)
        );
    }

    #[test]
    fn unknown_name_reports_the_offending_input() {
        let err = "NotARealKind".parse::<NotificationKind>().unwrap_err();
        assert_eq!(err, UnknownKind("NotARealKind".to_string()));
        assert_eq!(err.to_string(), "Unknown notification kind: NotARealKind");
    }
}
