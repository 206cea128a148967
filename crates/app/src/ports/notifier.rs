//! Notifier port — outbound text message delivery.
//!
//! The transport (SMS gateway, messaging API, …) lives behind this trait.
//! It owns its own timeout and retry policy; the application core records
//! failures, it never retries them.

use std::future::Future;

use gather_domain::error::GatherError;

/// One message addressed to one phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub phone: String,
    pub message: String,
}

/// Per-batch accounting of a bulk send.
///
/// A bulk send is never all-or-nothing: each message succeeds or fails
/// independently and the counts are reported together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub successful: usize,
    pub failed: usize,
}

/// Outbound message delivery.
pub trait Notifier {
    /// Send a single message, returning the transport's message id.
    fn send(
        &self,
        phone: &str,
        message: &str,
    ) -> impl Future<Output = Result<String, GatherError>> + Send;

    /// Send many independent messages as one batch.
    fn send_bulk(
        &self,
        messages: Vec<OutboundMessage>,
    ) -> impl Future<Output = Result<BulkOutcome, GatherError>> + Send;
}
