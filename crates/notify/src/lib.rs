//! Fleet notification delivery engine.
//!
//! The asynchronous path from a domain event to a message in a user's inbox:
//!
//! - [`NotificationProducer`] — validates an event kind and durably inserts
//!   a `Pending` record; enqueue never attempts delivery.
//! - [`FormatterRegistry`] — ordered per-kind rendering strategies behind a
//!   mandatory catch-all.
//! - [`NotificationDispatcher`] — background loop that polls pending
//!   records, renders a body, attempts delivery, and persists the outcome.
//! - [`store`] — ports onto the record store and recipient directory, with
//!   their PostgreSQL adapters.
//! - [`delivery`] — the transport port, with SMTP ([`EmailTransport`]) and
//!   log-only ([`LogTransport`]) adapters.

pub mod delivery;
pub mod dispatch;
pub mod enqueue;
pub mod format;
pub mod store;

pub use delivery::{EmailConfig, EmailTransport, LogTransport, Transport, TransportError};
pub use dispatch::{NotificationDispatcher, TickStats, DEFAULT_POLL_INTERVAL};
pub use enqueue::{EnqueueError, NotificationProducer};
pub use format::{default_registry, FormatterRegistry, NotificationFormatter, RenderError};
pub use store::{PgRecipientLookup, PgRecordStore, Recipient, RecipientLookup, RecordStore};
