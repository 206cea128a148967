//! Event store port — persistence for events and their registrations.

use std::future::Future;

use gather_domain::error::GatherError;
use gather_domain::event::Event;
use gather_domain::id::{EventId, RegistrationId};
use gather_domain::registration::Registration;
use gather_domain::time::Timestamp;

/// Repository for [`Event`] aggregates.
///
/// The store owns the authoritative participant list; services only read
/// through it and request mutations, never hold a private copy as source
/// of truth.
pub trait EventStore {
    /// Get an event (with its participants) by id.
    fn find_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, GatherError>> + Send;

    /// Get all events with their participants.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Event>, GatherError>> + Send;

    /// Get events whose start time falls in `[start, end)`, with their
    /// participants.
    fn find_in_window(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Event>, GatherError>> + Send;

    /// Atomically mark a pending participant `active` and verified,
    /// re-checking seat capacity inside the mutation.
    ///
    /// Returns `true` iff the mutation applied. A `false` return means a
    /// concurrent request changed the registration or took the last seat
    /// between the caller's checks and this call.
    fn mark_participant_verified_and_active(
        &self,
        event_id: EventId,
        registration_id: RegistrationId,
    ) -> impl Future<Output = Result<bool, GatherError>> + Send;

    /// Get the registrations of one event, in registration order.
    fn find_registrations_by_event(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Registration>, GatherError>> + Send;
}
