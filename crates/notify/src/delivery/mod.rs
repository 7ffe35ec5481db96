//! Delivery transports for rendered notification bodies.
//!
//! [`Transport`] is the single-operation capability the dispatch loop pushes
//! rendered bodies through. [`EmailTransport`] is the production SMTP
//! adapter; [`LogTransport`] is the development fallback used when SMTP is
//! not configured.

pub mod email;
pub mod log;

pub use email::{EmailConfig, EmailTransport};
pub use log::LogTransport;

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// Any other transport-specific failure.
    #[error("Delivery failed: {0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A single-operation delivery capability.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver `body` to `address`.
    async fn deliver(&self, address: &str, body: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn deliver(&self, address: &str, body: &str) -> Result<(), TransportError> {
        (**self).deliver(address, body).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn deliver(&self, address: &str, body: &str) -> Result<(), TransportError> {
        (**self).deliver(address, body).await
    }
}
