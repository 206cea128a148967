//! Upcoming event selector — picks active events inside a time window.

use chrono::Duration;

use gather_domain::error::{GatherError, ValidationError};
use gather_domain::event::Event;
use gather_domain::time::{self, Timestamp};

use crate::ports::EventStore;

/// Default lookahead for reminder selection, in hours.
pub const DEFAULT_HOURS_AHEAD: i64 = 24;

/// Largest accepted lookahead, one year. Anything beyond it is a caller
/// mistake, and unbounded offsets would overflow the window arithmetic.
pub const MAX_HOURS_AHEAD: i64 = 24 * 365;

/// Read-only selection of events that need attention within a window.
pub struct UpcomingEventSelector<S> {
    store: S,
}

impl<S: EventStore> UpcomingEventSelector<S> {
    /// Create a new selector backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Active events starting in `[now + hours_ahead, now + hours_ahead + 1h)`,
    /// each with its full participant list regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] when `hours_ahead` is negative
    /// or above [`MAX_HOURS_AHEAD`] (rejected before any store call), or a
    /// storage error propagated unchanged — never retried here.
    #[tracing::instrument(skip(self))]
    pub async fn upcoming(&self, hours_ahead: i64) -> Result<Vec<Event>, GatherError> {
        if hours_ahead < 0 {
            return Err(ValidationError::NegativeHoursAhead.into());
        }
        if hours_ahead > MAX_HOURS_AHEAD {
            return Err(ValidationError::ExcessiveHoursAhead.into());
        }
        let start = time::now() + Duration::hours(hours_ahead);
        self.in_window(start).await
    }

    /// Active events starting in `[now, now + 1h)`, used by the scheduler
    /// for near-term alerts.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn starting_soon(&self) -> Result<Vec<Event>, GatherError> {
        self.in_window(time::now()).await
    }

    async fn in_window(&self, start: Timestamp) -> Result<Vec<Event>, GatherError> {
        let end = start + Duration::hours(1);
        let events = self.store.find_in_window(start, end).await?;
        Ok(events.into_iter().filter(|e| e.is_active).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_domain::time::Timestamp;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct InMemoryEventStore {
        events: Mutex<Vec<Event>>,
        calls: AtomicUsize,
    }

    impl InMemoryEventStore {
        fn with(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EventStore for InMemoryEventStore {
        async fn find_by_id(
            &self,
            id: gather_domain::id::EventId,
        ) -> Result<Option<Event>, GatherError> {
            let events = self.events.lock().unwrap();
            Ok(events.iter().find(|e| e.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Event>, GatherError> {
            Ok(self.events.lock().unwrap().clone())
        }

        async fn find_in_window(
            &self,
            start: Timestamp,
            end: Timestamp,
        ) -> Result<Vec<Event>, GatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let events = self.events.lock().unwrap();
            Ok(events
                .iter()
                .filter(|e| e.starts_at >= start && e.starts_at < end)
                .cloned()
                .collect())
        }

        async fn mark_participant_verified_and_active(
            &self,
            _event_id: gather_domain::id::EventId,
            _registration_id: gather_domain::id::RegistrationId,
        ) -> Result<bool, GatherError> {
            Ok(false)
        }

        async fn find_registrations_by_event(
            &self,
            _event_id: gather_domain::id::EventId,
        ) -> Result<Vec<gather_domain::registration::Registration>, GatherError> {
            Ok(vec![])
        }
    }

    fn event_at(offset: Duration, is_active: bool) -> Event {
        Event::builder()
            .title("Rust Meetup")
            .starts_at(time::now() + offset)
            .total_slots(10)
            .is_active(is_active)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_select_event_inside_the_lookahead_window() {
        let inside = event_at(Duration::hours(24) + Duration::minutes(30), true);
        let id = inside.id;
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![inside]));

        let selected = selector.upcoming(24).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, id);
    }

    #[tokio::test]
    async fn should_never_select_past_events() {
        let past = event_at(Duration::hours(-2), true);
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![past]));

        let selected = selector.upcoming(24).await.unwrap();
        assert!(selected.is_empty());
    }

    #[tokio::test]
    async fn should_not_select_event_past_the_window_end() {
        let beyond = event_at(Duration::hours(26), true);
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![beyond]));

        let selected = selector.upcoming(24).await.unwrap();
        assert!(selected.is_empty());
    }

    #[tokio::test]
    async fn should_never_select_inactive_events() {
        let inactive = event_at(Duration::hours(24) + Duration::minutes(30), false);
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![inactive]));

        let selected = selector.upcoming(24).await.unwrap();
        assert!(selected.is_empty());
    }

    #[tokio::test]
    async fn should_not_select_near_term_event_with_default_lookahead() {
        // Event in 90 minutes sits outside the 24h..25h window but inside
        // the 1h..2h window.
        let soon = event_at(Duration::minutes(90), true);
        let id = soon.id;
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![soon]));

        let selected = selector.upcoming(DEFAULT_HOURS_AHEAD).await.unwrap();
        assert!(selected.is_empty());

        let selected = selector.upcoming(1).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, id);
    }

    #[tokio::test]
    async fn should_select_starting_soon_events_in_the_next_hour() {
        let soon = event_at(Duration::minutes(30), true);
        let later = event_at(Duration::minutes(90), true);
        let soon_id = soon.id;
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![soon, later]));

        let selected = selector.starting_soon().await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, soon_id);
    }

    #[tokio::test]
    async fn should_keep_participants_regardless_of_status() {
        let mut registration = gather_domain::registration::Registration::builder()
            .name("Ana")
            .verification_code("123456")
            .build()
            .unwrap();
        registration.status = gather_domain::registration::RegistrationStatus::Cancelled;

        let event = Event::builder()
            .title("Rust Meetup")
            .starts_at(time::now() + Duration::minutes(30))
            .total_slots(10)
            .participant(registration)
            .build()
            .unwrap();
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![event]));

        let selected = selector.starting_soon().await.unwrap();
        assert_eq!(selected[0].participants.len(), 1);
    }

    #[tokio::test]
    async fn should_reject_negative_lookahead_before_any_store_call() {
        let store = InMemoryEventStore::with(vec![]);
        let selector = UpcomingEventSelector::new(store);

        let result = selector.upcoming(-1).await;
        assert!(matches!(
            result,
            Err(GatherError::Validation(
                ValidationError::NegativeHoursAhead
            ))
        ));
        assert_eq!(selector.store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_oversized_lookahead_before_any_store_call() {
        let store = InMemoryEventStore::with(vec![]);
        let selector = UpcomingEventSelector::new(store);

        for hours_ahead in [MAX_HOURS_AHEAD + 1, 10_000_000_000, i64::MAX] {
            let result = selector.upcoming(hours_ahead).await;
            assert!(matches!(
                result,
                Err(GatherError::Validation(
                    ValidationError::ExcessiveHoursAhead
                ))
            ));
        }
        assert_eq!(selector.store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_accept_lookahead_at_the_ceiling() {
        let inside = event_at(Duration::hours(MAX_HOURS_AHEAD) + Duration::minutes(30), true);
        let id = inside.id;
        let selector = UpcomingEventSelector::new(InMemoryEventStore::with(vec![inside]));

        let selected = selector.upcoming(MAX_HOURS_AHEAD).await.unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, id);
    }

    #[tokio::test]
    async fn should_surface_store_errors_unchanged() {
        struct FailingStore;

        impl EventStore for FailingStore {
            async fn find_by_id(
                &self,
                _id: gather_domain::id::EventId,
            ) -> Result<Option<Event>, GatherError> {
                Err(GatherError::Storage("connection reset".into()))
            }
            async fn find_all(&self) -> Result<Vec<Event>, GatherError> {
                Err(GatherError::Storage("connection reset".into()))
            }
            async fn find_in_window(
                &self,
                _start: Timestamp,
                _end: Timestamp,
            ) -> Result<Vec<Event>, GatherError> {
                Err(GatherError::Storage("connection reset".into()))
            }
            async fn mark_participant_verified_and_active(
                &self,
                _event_id: gather_domain::id::EventId,
                _registration_id: gather_domain::id::RegistrationId,
            ) -> Result<bool, GatherError> {
                Err(GatherError::Storage("connection reset".into()))
            }
            async fn find_registrations_by_event(
                &self,
                _event_id: gather_domain::id::EventId,
            ) -> Result<Vec<gather_domain::registration::Registration>, GatherError> {
                Err(GatherError::Storage("connection reset".into()))
            }
        }

        let selector = UpcomingEventSelector::new(FailingStore);
        let result = selector.upcoming(24).await;
        assert!(matches!(result, Err(GatherError::Storage(_))));
    }
}
