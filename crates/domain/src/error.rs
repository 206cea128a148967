//! Common error types used across the workspace.
//!
//! Four categories: input validation, not-found, state conflict, and
//! infrastructure. The first three are expected, user-facing outcomes with
//! a specific message; infrastructure errors are caught at the boundary of
//! each public operation and carry their underlying source.

/// Top-level error for all gather operations.
#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    /// A request parameter was missing or invalid. Rejected before any
    /// collaborator call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced event or pending registration does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The operation is valid but the current state forbids it.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A storage or transport collaborator failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input validation failures.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An event must have a non-empty title.
    #[error("Event title must not be empty")]
    EmptyTitle,

    /// An event must have at least one seat.
    #[error("Event must have at least one slot")]
    ZeroSlots,

    /// A registration must have a non-empty participant name.
    #[error("Participant name must not be empty")]
    EmptyName,

    /// A registration must carry a verification code.
    #[error("Verification code must not be empty")]
    EmptyVerificationCode,

    /// A verification request must carry all three identifiers.
    #[error("Event id, registration id and verification code are required")]
    MissingVerificationInput,

    /// The dispatch window offset must be non-negative.
    #[error("hours_ahead must be a non-negative number")]
    NegativeHoursAhead,

    /// The dispatch window offset must stay within a year.
    #[error("hours_ahead must not exceed 8760 (one year)")]
    ExcessiveHoursAhead,
}

/// A referenced record was not found.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Human-readable kind of the missing record.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// State conflicts — the registration state machine refused a transition.
///
/// None of these mutate state; the registration stays exactly as it was.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// Verification is one-shot; a second submission must not re-activate.
    #[error("Registration already verified")]
    AlreadyVerified,

    /// The submitted code does not match the stored one.
    #[error("Invalid verification code")]
    InvalidCode,

    /// The 24-hour verification window has passed.
    #[error("Verification code expired")]
    CodeExpired,

    /// The event has been deactivated.
    #[error("Event is not active")]
    EventInactive,

    /// All seats are taken by active registrations.
    #[error("Event is full")]
    EventFull,

    /// The conditional store mutation did not apply — a concurrent request
    /// won the race between check and update.
    #[error("Failed to verify registration")]
    NotApplied,
}
