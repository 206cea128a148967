//! # gather-adapter-notifier-log
//!
//! Log-only implementation of the [`Notifier`] port. Every message is
//! written to the log and recorded in memory; nothing leaves the process.
//! Useful for local development, demos, and as the default notifier when
//! no messaging gateway is configured.
//!
//! ## Dependency rule
//!
//! Depends on `gather-app` (port traits) and `gather-domain` only.

use std::sync::Mutex;

use gather_app::ports::{BulkOutcome, Notifier, OutboundMessage};
use gather_domain::error::GatherError;

/// Notifier that logs messages instead of delivering them.
///
/// Every send succeeds and yields a synthetic message id.
#[derive(Default)]
pub struct LogNotifier {
    sent: Mutex<Vec<OutboundMessage>>,
}

impl LogNotifier {
    /// Create a new notifier with an empty send record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message handed to this notifier so far.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.lock_sent().clone()
    }

    fn record(&self, phone: &str, message: &str) -> String {
        let id = format!("log-{}", uuid::Uuid::new_v4());
        tracing::info!(phone, message, message_id = %id, "outbound message logged");
        self.lock_sent().push(OutboundMessage {
            phone: phone.to_string(),
            message: message.to_string(),
        });
        id
    }

    fn lock_sent(&self) -> std::sync::MutexGuard<'_, Vec<OutboundMessage>> {
        self.sent
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Notifier for LogNotifier {
    async fn send(&self, phone: &str, message: &str) -> Result<String, GatherError> {
        Ok(self.record(phone, message))
    }

    async fn send_bulk(&self, messages: Vec<OutboundMessage>) -> Result<BulkOutcome, GatherError> {
        let count = messages.len();
        for outbound in &messages {
            self.record(&outbound.phone, &outbound.message);
        }
        Ok(BulkOutcome {
            successful: count,
            failed: 0,
        })
    }
}
