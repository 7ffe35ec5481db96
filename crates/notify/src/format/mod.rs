//! Per-kind rendering strategies and the ordered formatter registry.
//!
//! A formatter is a stateless strategy identified by the predicate it
//! answers ([`NotificationFormatter::can_handle`]) and the rendering it
//! performs. The registry consults formatters in registration order and the
//! final entry must be an unconditional catch-all, so resolution can never
//! come up empty at dispatch time.

pub mod payload;

mod default;
mod payment;
mod reservation;

pub use default::DefaultFormatter;
pub use payment::PaymentSucceededFormatter;
pub use reservation::{
    ReservationConfirmedFormatter, ReservationCreatedFormatter, VehiclePickedUpFormatter,
    VehicleReturnedFormatter,
};

use fleet_core::kind::NotificationKind;
use fleet_db::models::notification::Notification;

use crate::store::Recipient;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error produced when a record cannot be rendered.
///
/// Recoverable from the dispatch loop's point of view: the record is marked
/// failed and the loop moves on.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The stored kind name does not parse as a known kind.
    #[error(transparent)]
    UnknownKind(#[from] fleet_core::kind::UnknownKind),

    /// The payload does not deserialize to the shape the formatter expects.
    #[error("Payload does not match the expected shape: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Error raised when a registry is constructed from an invalid formatter set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Formatter registry must contain at least one formatter")]
    Empty,

    #[error("The final registry entry must be a catch-all, but it does not handle {0}")]
    MissingCatchAll(NotificationKind),

    #[error("More than one specific formatter claims kind {0}")]
    OverlappingClaim(NotificationKind),
}

// ---------------------------------------------------------------------------
// NotificationFormatter
// ---------------------------------------------------------------------------

/// A stateless rendering strategy bound to a predicate over event kind.
pub trait NotificationFormatter: Send + Sync {
    /// Whether this formatter renders records of `kind`.
    fn can_handle(&self, kind: NotificationKind) -> bool;

    /// Render the message body for a record addressed to `recipient`.
    fn render(&self, record: &Notification, recipient: &Recipient) -> Result<String, RenderError>;
}

// ---------------------------------------------------------------------------
// FormatterRegistry
// ---------------------------------------------------------------------------

/// An ordered set of formatters terminated by a mandatory catch-all.
pub struct FormatterRegistry {
    formatters: Vec<Box<dyn NotificationFormatter>>,
}

impl FormatterRegistry {
    /// Build a registry, validating its structure up front.
    ///
    /// Fails when the set is empty, when the final entry does not answer
    /// `can_handle` for every [`NotificationKind`], or when two non-final
    /// entries both claim the same kind. Failing here keeps "no formatter
    /// found" impossible at dispatch time.
    pub fn new(formatters: Vec<Box<dyn NotificationFormatter>>) -> Result<Self, RegistryError> {
        let Some((catch_all, specific)) = formatters.split_last() else {
            return Err(RegistryError::Empty);
        };

        for kind in NotificationKind::ALL {
            if !catch_all.can_handle(kind) {
                return Err(RegistryError::MissingCatchAll(kind));
            }
            let claims = specific.iter().filter(|f| f.can_handle(kind)).count();
            if claims > 1 {
                return Err(RegistryError::OverlappingClaim(kind));
            }
        }

        Ok(Self { formatters })
    }

    /// The first formatter in registration order whose predicate claims
    /// `kind`.
    pub fn resolve(&self, kind: NotificationKind) -> &dyn NotificationFormatter {
        match self.formatters.iter().find(|f| f.can_handle(kind)) {
            Some(formatter) => formatter.as_ref(),
            // The constructor guarantees a non-empty set whose final entry
            // handles every kind, so this arm is unreachable in practice.
            None => self.formatters[self.formatters.len() - 1].as_ref(),
        }
    }
}

/// The production formatter ordering: one specific formatter per
/// payload-rich kind, then [`DefaultFormatter`] as the catch-all.
pub fn default_registry() -> Result<FormatterRegistry, RegistryError> {
    FormatterRegistry::new(vec![
        Box::new(ReservationCreatedFormatter),
        Box::new(ReservationConfirmedFormatter),
        Box::new(VehiclePickedUpFormatter),
        Box::new(VehicleReturnedFormatter),
        Box::new(PaymentSucceededFormatter),
        Box::new(DefaultFormatter),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
