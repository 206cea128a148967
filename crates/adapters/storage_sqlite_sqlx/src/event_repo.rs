//! `SQLite` implementation of [`EventStore`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gather_app::ports::EventStore;
use gather_domain::error::GatherError;
use gather_domain::event::Event;
use gather_domain::id::{EventId, RegistrationId};
use gather_domain::registration::{Registration, RegistrationStatus};
use gather_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Event`].
///
/// Rows carry no participants; the aggregate is completed by a second
/// query against the registrations table.
struct EventWrapper(Event);

impl EventWrapper {
    fn maybe(value: Option<Self>) -> Option<Event> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for EventWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let description: String = row.try_get("description")?;
        let location: String = row.try_get("location")?;
        let starts_at_str: String = row.try_get("starts_at")?;
        let total_slots: u32 = row.try_get("total_slots")?;
        let is_active: bool = row.try_get("is_active")?;

        let starts_at = parse_timestamp(&starts_at_str)?;

        Ok(Self(Event {
            id: EventId::from_uuid(id),
            title,
            description,
            location,
            starts_at,
            total_slots,
            is_active,
            participants: Vec::new(),
        }))
    }
}

/// Wrapper for converting database rows into domain [`Registration`].
struct RegistrationWrapper(Registration);

impl<'r> FromRow<'r, SqliteRow> for RegistrationWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let phone: String = row.try_get("phone")?;
        let status: String = row.try_get("status")?;
        let verified: bool = row.try_get("verified")?;
        let verification_code: String = row.try_get("verification_code")?;
        let registered_at_str: String = row.try_get("registered_at")?;

        let status = RegistrationStatus::from_str(&status)
            .map_err(|err| sqlx::Error::Decode(err.into()))?;
        let registered_at = parse_timestamp(&registered_at_str)?;

        Ok(Self(Registration {
            id: RegistrationId::from_uuid(id),
            name,
            email,
            phone,
            status,
            verified,
            verification_code,
            registered_at,
        }))
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

const INSERT_EVENT: &str = r"
    INSERT INTO events (id, title, description, location, starts_at, total_slots, is_active)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const INSERT_REGISTRATION: &str = r"
    INSERT INTO registrations (id, event_id, name, email, phone, status, verified, verification_code, registered_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_EVENT_BY_ID: &str = "SELECT * FROM events WHERE id = ?";
const SELECT_EVENTS: &str = "SELECT * FROM events ORDER BY starts_at";
const SELECT_EVENTS_IN_WINDOW: &str =
    "SELECT * FROM events WHERE starts_at >= ? AND starts_at < ? ORDER BY starts_at";
const SELECT_REGISTRATIONS_BY_EVENT: &str =
    "SELECT * FROM registrations WHERE event_id = ? ORDER BY registered_at, rowid";

// The pending → active transition re-checks everything it relies on in a
// single statement: the registration must still be pending and unverified,
// the event must still be active, and the active count must still be below
// capacity. Zero affected rows means some check no longer holds.
const VERIFY_AND_ACTIVATE: &str = r"
    UPDATE registrations
    SET status = 'active', verified = 1
    WHERE id = ?
      AND event_id = ?
      AND status = 'pending'
      AND verified = 0
      AND (SELECT e.is_active FROM events e WHERE e.id = registrations.event_id) = 1
      AND (
          SELECT COUNT(*) FROM registrations r
          WHERE r.event_id = registrations.event_id AND r.status = 'active'
      ) < (SELECT e.total_slots FROM events e WHERE e.id = registrations.event_id)
";

/// `SQLite`-backed event store.
pub struct SqliteEventStore {
    pool: SqlitePool,
}

impl SqliteEventStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist an event together with its participants.
    ///
    /// Registration intake lives outside this subsystem; this write path
    /// exists for imports and test fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Storage`] when a statement fails.
    pub async fn insert(&self, event: &Event) -> Result<(), GatherError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(INSERT_EVENT)
            .bind(event.id.as_uuid())
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.starts_at.to_rfc3339())
            .bind(event.total_slots)
            .bind(event.is_active)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        for registration in &event.participants {
            sqlx::query(INSERT_REGISTRATION)
                .bind(registration.id.as_uuid())
                .bind(event.id.as_uuid())
                .bind(&registration.name)
                .bind(&registration.email)
                .bind(&registration.phone)
                .bind(registration.status.as_str())
                .bind(registration.verified)
                .bind(&registration.verification_code)
                .bind(registration.registered_at.to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }

    async fn participants_of(&self, event_id: EventId) -> Result<Vec<Registration>, StorageError> {
        let rows: Vec<RegistrationWrapper> = sqlx::query_as(SELECT_REGISTRATIONS_BY_EVENT)
            .bind(event_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn assemble(&self, mut event: Event) -> Result<Event, StorageError> {
        event.participants = self.participants_of(event.id).await?;
        Ok(event)
    }

    async fn assemble_all(&self, rows: Vec<EventWrapper>) -> Result<Vec<Event>, StorageError> {
        let mut events = Vec::with_capacity(rows.len());
        for wrapper in rows {
            events.push(self.assemble(wrapper.0).await?);
        }
        Ok(events)
    }
}

impl EventStore for SqliteEventStore {
    fn find_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, GatherError>> + Send {
        async move {
            let row: Option<EventWrapper> = sqlx::query_as(SELECT_EVENT_BY_ID)
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::from)?;

            match EventWrapper::maybe(row) {
                Some(event) => Ok(Some(self.assemble(event).await?)),
                None => Ok(None),
            }
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Event>, GatherError>> + Send {
        async move {
            let rows: Vec<EventWrapper> = sqlx::query_as(SELECT_EVENTS)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;

            Ok(self.assemble_all(rows).await?)
        }
    }

    fn find_in_window(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Event>, GatherError>> + Send {
        async move {
            let rows: Vec<EventWrapper> = sqlx::query_as(SELECT_EVENTS_IN_WINDOW)
                .bind(start.to_rfc3339())
                .bind(end.to_rfc3339())
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;

            Ok(self.assemble_all(rows).await?)
        }
    }

    fn mark_participant_verified_and_active(
        &self,
        event_id: EventId,
        registration_id: RegistrationId,
    ) -> impl Future<Output = Result<bool, GatherError>> + Send {
        async move {
            let result = sqlx::query(VERIFY_AND_ACTIVATE)
                .bind(registration_id.as_uuid())
                .bind(event_id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn find_registrations_by_event(
        &self,
        event_id: EventId,
    ) -> impl Future<Output = Result<Vec<Registration>, GatherError>> + Send {
        async move { Ok(self.participants_of(event_id).await?) }
    }
}
