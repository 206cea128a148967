//! Event — a scheduled gathering with a seat capacity and participants.
//!
//! The event owns its participant list; insertion order is registration
//! order. The capacity invariant (`active` registrations never exceed
//! `total_slots`) is enforced at the moment of a pending → active
//! transition, never at creation time.

use serde::{Deserialize, Serialize};

use crate::error::{GatherError, ValidationError};
use crate::id::{EventId, RegistrationId};
use crate::registration::{Registration, RegistrationStatus};
use crate::time::Timestamp;

/// A scheduled event with embedded registrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: Timestamp,
    pub total_slots: u32,
    pub is_active: bool,
    pub participants: Vec<Registration>,
}

impl Event {
    /// Create a builder for constructing an [`Event`].
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] when `title` is empty or
    /// `total_slots` is zero.
    pub fn validate(&self) -> Result<(), GatherError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if self.total_slots == 0 {
            return Err(ValidationError::ZeroSlots.into());
        }
        Ok(())
    }

    /// Number of registrations currently consuming a seat.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status == RegistrationStatus::Active)
            .count()
    }

    /// Whether every seat is taken by an active registration.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active_count() >= self.total_slots as usize
    }

    /// Find a participant by id regardless of status.
    #[must_use]
    pub fn participant(&self, id: RegistrationId) -> Option<&Registration> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Build the reminder text for one participant.
    ///
    /// Pure formatting: title, description, day/month/year date,
    /// hour:minute time, location, and the participant's name.
    #[must_use]
    pub fn reminder_message(&self, participant_name: &str) -> String {
        format!(
            "Hi {participant_name}! This is a reminder for {title} on {date} at {time}, location: {location}. {description}",
            title = self.title,
            date = self.starts_at.format("%d/%m/%Y"),
            time = self.starts_at.format("%H:%M"),
            location = self.location,
            description = self.description,
        )
    }
}

/// Step-by-step builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    starts_at: Option<Timestamp>,
    total_slots: Option<u32>,
    is_active: Option<bool>,
    participants: Vec<Registration>,
}

impl EventBuilder {
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn starts_at(mut self, starts_at: Timestamp) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    #[must_use]
    pub fn total_slots(mut self, total_slots: u32) -> Self {
        self.total_slots = Some(total_slots);
        self
    }

    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Append a participant, preserving registration order.
    #[must_use]
    pub fn participant(mut self, registration: Registration) -> Self {
        self.participants.push(registration);
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// Events default to active, starting now, with a single slot left
    /// unset counting as invalid.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Validation`] if `title` is missing or empty
    /// or `total_slots` is zero.
    pub fn build(self) -> Result<Event, GatherError> {
        let event = Event {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            starts_at: self.starts_at.unwrap_or_else(crate::time::now),
            total_slots: self.total_slots.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
            participants: self.participants,
        };
        event.validate()?;
        Ok(event)
    }
}
