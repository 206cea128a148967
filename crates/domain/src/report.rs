//! Dispatch report — transient accounting for one reminder run.
//!
//! Exists only for the duration of one scheduler tick or one manual
//! dispatch invocation; never persisted.

use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// Per-event detail of a dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDispatchDetail {
    pub event_id: EventId,
    pub title: String,
    /// Number of participants the event carried when dispatched.
    pub participants: usize,
    /// Messages the notifier reported as sent.
    pub sent: usize,
}

/// Aggregate outcome of one dispatch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchReport {
    pub events_processed: usize,
    pub messages_sent: usize,
    pub messages_failed: usize,
    pub details: Vec<EventDispatchDetail>,
}

impl DispatchReport {
    /// Record the outcome of one event's bulk send.
    ///
    /// `failed` is tracked in the aggregate only; the per-event detail
    /// carries the sent count alongside the participant count.
    pub fn record(&mut self, detail: EventDispatchDetail, failed: usize) {
        self.events_processed += 1;
        self.messages_sent += detail.sent;
        self.messages_failed += failed;
        self.details.push(detail);
    }
}
