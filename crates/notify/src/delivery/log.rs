//! Log-only delivery for environments without SMTP configuration.

use async_trait::async_trait;

use super::{Transport, TransportError};

/// Maximum number of body characters echoed to the log.
const PREVIEW_CHARS: usize = 300;

/// Development transport: records the delivery in the log instead of
/// sending anything. Every delivery succeeds.
pub struct LogTransport;

#[async_trait]
impl Transport for LogTransport {
    async fn deliver(&self, address: &str, body: &str) -> Result<(), TransportError> {
        let preview: String = body.chars().take(PREVIEW_CHARS).collect();
        tracing::info!(
            to = address,
            body = %preview,
            "Email delivery disabled; logging notification instead"
        );
        Ok(())
    }
}
