//! Registration — a participant of an [`Event`](crate::event::Event).
//!
//! A registration is created as `pending`/unverified with an opaque
//! verification code. The only transition to `active` goes through the
//! registration verifier; cancellation happens elsewhere and is terminal.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{GatherError, ValidationError};
use crate::id::RegistrationId;
use crate::time::Timestamp;

/// Hours during which a verification code is acceptable after registration.
pub const VERIFICATION_WINDOW_HOURS: i64 = 24;

/// Lifecycle state of a registration.
///
/// Only `active` registrations consume a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Created, waiting for code verification. Does not consume a seat.
    Pending,
    /// Verified; consumes a seat. Terminal success state.
    Active,
    /// Cancelled out-of-band. Terminal.
    Cancelled,
}

impl RegistrationStatus {
    /// Stable string form used by storage adapters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown registration status: {other}")),
        }
    }
}

/// A participant registered for an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: RegistrationStatus,
    pub verified: bool,
    pub verification_code: String,
    pub registered_at: Timestamp,
}

impl Registration {
    /// Create a builder for constructing a [`Registration`].
    #[must_use]
    pub fn builder() -> RegistrationBuilder {
        RegistrationBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] when `name` or
    /// `verification_code` is empty.
    pub fn validate(&self) -> Result<(), GatherError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.verification_code.is_empty() {
            return Err(ValidationError::EmptyVerificationCode.into());
        }
        Ok(())
    }

    /// Whether the verification window has passed at `now`.
    #[must_use]
    pub fn verification_expired(&self, now: Timestamp) -> bool {
        now - self.registered_at > Duration::hours(VERIFICATION_WINDOW_HOURS)
    }

    /// Compare a submitted code against the stored one.
    ///
    /// Surrounding whitespace on the submitted code is ignored; the
    /// comparison itself is exact.
    #[must_use]
    pub fn code_matches(&self, submitted: &str) -> bool {
        submitted.trim() == self.verification_code
    }
}

/// Step-by-step builder for [`Registration`].
#[derive(Debug, Default)]
pub struct RegistrationBuilder {
    id: Option<RegistrationId>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    status: Option<RegistrationStatus>,
    verified: bool,
    verification_code: Option<String>,
    registered_at: Option<Timestamp>,
}

impl RegistrationBuilder {
    #[must_use]
    pub fn id(mut self, id: RegistrationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: RegistrationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    #[must_use]
    pub fn verification_code(mut self, code: impl Into<String>) -> Self {
        self.verification_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn registered_at(mut self, registered_at: Timestamp) -> Self {
        self.registered_at = Some(registered_at);
        self
    }

    /// Consume the builder, validate, and return a [`Registration`].
    ///
    /// New registrations default to `pending` and unverified, registered
    /// at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] if `name` or
    /// `verification_code` is missing or empty.
    pub fn build(self) -> Result<Registration, GatherError> {
        let registration = Registration {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            status: self.status.unwrap_or(RegistrationStatus::Pending),
            verified: self.verified,
            verification_code: self.verification_code.unwrap_or_default(),
            registered_at: self.registered_at.unwrap_or_else(crate::time::now),
        };
        registration.validate()?;
        Ok(registration)
    }
}
