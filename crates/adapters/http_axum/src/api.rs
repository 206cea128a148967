//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod reminders;
#[allow(clippy::missing_errors_doc)]
pub mod verifications;

use axum::Router;
use axum::routing::{get, post};

use gather_app::ports::{EventStore, Notifier};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, N>() -> Router<AppState<S, N>>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        // Verifications
        .route("/verifications", post(verifications::create::<S, N>))
        // Reminders
        .route("/reminders/dispatch", post(reminders::dispatch::<S, N>))
        // Events
        .route("/events", get(events::list::<S, N>))
        .route("/events/{id}", get(events::get::<S, N>))
        .route(
            "/events/{id}/registrations",
            get(events::registrations::<S, N>),
        )
}
