//! Shared application state for axum handlers.

use std::sync::Arc;

use gather_app::ports::{EventStore, Notifier};
use gather_app::services::dispatcher::ReminderDispatcher;
use gather_app::services::verifier::RegistrationVerifier;

/// Application state shared across all axum handlers.
///
/// Generic over the event store and notifier types to avoid dynamic
/// dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone` — only the `Arc` wrappers are
/// cloned.
pub struct AppState<S, N> {
    /// Registration verification service.
    pub verifier: Arc<RegistrationVerifier<S, N>>,
    /// Reminder selection + dispatch service.
    pub dispatcher: Arc<ReminderDispatcher<S, N>>,
    /// Event store for read endpoints.
    pub event_store: Arc<S>,
}

impl<S, N> Clone for AppState<S, N> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            dispatcher: Arc::clone(&self.dispatcher),
            event_store: Arc::clone(&self.event_store),
        }
    }
}

impl<S, N> AppState<S, N>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        verifier: RegistrationVerifier<S, N>,
        dispatcher: ReminderDispatcher<S, N>,
        event_store: S,
    ) -> Self {
        Self {
            verifier: Arc::new(verifier),
            dispatcher: Arc::new(dispatcher),
            event_store: Arc::new(event_store),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the dispatcher is shared with the background
    /// scheduler before constructing the HTTP state.
    pub fn from_arcs(
        verifier: Arc<RegistrationVerifier<S, N>>,
        dispatcher: Arc<ReminderDispatcher<S, N>>,
        event_store: Arc<S>,
    ) -> Self {
        Self {
            verifier,
            dispatcher,
            event_store,
        }
    }
}
