//! Registration verifier — the pending → active verification state machine.
//!
//! One request carries `(event_id, registration_id, code)`. The checks run
//! in order and short-circuit; every rejection leaves the registration
//! exactly as it was. The final mutation is conditional at the store so
//! that concurrent requests (possibly in other process instances) can
//! neither double-activate a registration nor overbook the event.

use gather_domain::error::{ConflictError, GatherError, NotFoundError, ValidationError};
use gather_domain::id::{EventId, RegistrationId};
use gather_domain::registration::RegistrationStatus;
use gather_domain::time;

use crate::ports::{EventStore, Notifier};

/// Application service verifying registration codes.
pub struct RegistrationVerifier<S, N> {
    store: S,
    notifier: N,
}

impl<S: EventStore, N: Notifier> RegistrationVerifier<S, N> {
    /// Create a new verifier backed by the given store and notifier.
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Verify a registration code and activate the registration.
    ///
    /// On success a confirmation message is sent best-effort: a notifier
    /// failure is logged and swallowed, it never turns a successful
    /// verification into a failure.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] for a blank code,
    /// [`GatherError::NotFound`] when the event or a pending registration
    /// is missing, [`GatherError::Conflict`] for every state-machine
    /// rejection (already verified, invalid code, expired code, inactive
    /// event, full event, lost update), and [`GatherError::Storage`] when
    /// the store itself fails.
    #[tracing::instrument(skip(self, code), fields(event_id = %event_id, registration_id = %registration_id))]
    pub async fn verify(
        &self,
        event_id: EventId,
        registration_id: RegistrationId,
        code: &str,
    ) -> Result<(), GatherError> {
        if code.trim().is_empty() {
            return Err(ValidationError::MissingVerificationInput.into());
        }

        let event = self.store.find_by_id(event_id).await?.ok_or_else(|| {
            GatherError::from(NotFoundError {
                entity: "Event",
                id: event_id.to_string(),
            })
        })?;

        if !event.is_active {
            return Err(ConflictError::EventInactive.into());
        }

        let registration = event.participant(registration_id).ok_or_else(|| {
            GatherError::from(NotFoundError {
                entity: "Pending registration",
                id: registration_id.to_string(),
            })
        })?;

        // Verification is one-shot: a verified registration reports
        // "already verified" rather than "not found", so a duplicate
        // submission gets a meaningful answer.
        if registration.verified {
            return Err(ConflictError::AlreadyVerified.into());
        }
        if registration.status != RegistrationStatus::Pending {
            return Err(GatherError::from(NotFoundError {
                entity: "Pending registration",
                id: registration_id.to_string(),
            }));
        }

        if !registration.code_matches(code) {
            return Err(ConflictError::InvalidCode.into());
        }
        if registration.verification_expired(time::now()) {
            return Err(ConflictError::CodeExpired.into());
        }
        if event.is_full() {
            return Err(ConflictError::EventFull.into());
        }

        let applied = self
            .store
            .mark_participant_verified_and_active(event_id, registration_id)
            .await?;
        if !applied {
            // The checks above passed on a snapshot; a concurrent request
            // changed the registration or took the last seat in between.
            return Err(ConflictError::NotApplied.into());
        }

        let confirmation = format!(
            "Your registration for {} is confirmed. See you there!",
            event.title
        );
        if let Err(err) = self.notifier.send(&registration.phone, &confirmation).await {
            tracing::warn!(error = %err, "confirmation message failed; verification stands");
        }

        Ok(())
    }
}
