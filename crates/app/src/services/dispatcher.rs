//! Reminder dispatcher — per-event bulk sends with partial-failure accounting.

use gather_domain::error::GatherError;
use gather_domain::event::Event;
use gather_domain::report::{DispatchReport, EventDispatchDetail};

use crate::ports::{EventStore, Notifier, OutboundMessage};
use crate::services::selector::UpcomingEventSelector;

/// Application service building and submitting reminder messages.
///
/// Events are processed one at a time; all messages for one event go out
/// as a single bulk call. A partially failed bulk call is recorded in the
/// aggregate, never raised as an overall error.
pub struct ReminderDispatcher<S, N> {
    selector: UpcomingEventSelector<S>,
    notifier: N,
}

impl<S: EventStore, N: Notifier> ReminderDispatcher<S, N> {
    /// Create a new dispatcher from a selector and a notifier.
    pub fn new(selector: UpcomingEventSelector<S>, notifier: N) -> Self {
        Self { selector, notifier }
    }

    /// Select events `hours_ahead` out and dispatch reminders for them.
    ///
    /// An empty selection is a success with `events_processed = 0`.
    ///
    /// # Errors
    ///
    /// Fails only when the event set itself cannot be obtained: an invalid
    /// `hours_ahead` or a storage error from the selector.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, hours_ahead: i64) -> Result<DispatchReport, GatherError> {
        let events = self.selector.upcoming(hours_ahead).await?;
        Ok(self.dispatch(&events).await)
    }

    /// Dispatch reminders for events starting within the next hour.
    ///
    /// This is the scheduler's entry point.
    ///
    /// # Errors
    ///
    /// Fails only when the event set itself cannot be obtained.
    #[tracing::instrument(skip(self))]
    pub async fn run_starting_soon(&self) -> Result<DispatchReport, GatherError> {
        let events = self.selector.starting_soon().await?;
        Ok(self.dispatch(&events).await)
    }

    /// Build one message per participant and submit one bulk call per event.
    ///
    /// Events without participants are counted but skipped entirely: no
    /// empty bulk call is issued. A bulk transport error counts every
    /// message of that event as failed and processing continues.
    pub async fn dispatch(&self, events: &[Event]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for event in events {
            let messages: Vec<OutboundMessage> = event
                .participants
                .iter()
                .map(|p| OutboundMessage {
                    phone: p.phone.clone(),
                    message: event.reminder_message(&p.name),
                })
                .collect();
            let participants = messages.len();

            let (sent, failed) = if messages.is_empty() {
                (0, 0)
            } else {
                match self.notifier.send_bulk(messages).await {
                    Ok(outcome) => (outcome.successful, outcome.failed),
                    Err(err) => {
                        tracing::warn!(
                            event_id = %event.id,
                            error = %err,
                            "bulk send failed for event"
                        );
                        (0, participants)
                    }
                }
            };

            report.record(
                EventDispatchDetail {
                    event_id: event.id,
                    title: event.title.clone(),
                    participants,
                    sent,
                },
                failed,
            );
        }

        tracing::info!(
            events = report.events_processed,
            sent = report.messages_sent,
            failed = report.messages_failed,
            "reminder dispatch complete"
        );
        report
    }
}
