//! JSON REST handlers for event reads.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use gather_app::ports::{EventStore, Notifier};
use gather_domain::error::{GatherError, NotFoundError};
use gather_domain::event::Event;
use gather_domain::id::EventId;
use gather_domain::registration::Registration;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Event>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the registrations endpoint.
pub enum RegistrationsResponse {
    Ok(Json<Vec<Registration>>),
}

impl IntoResponse for RegistrationsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/events`
pub async fn list<S, N>(State(state): State<AppState<S, N>>) -> Result<ListResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let events = state.event_store.find_all().await?;
    Ok(ListResponse::Ok(Json(events)))
}

/// `GET /api/events/{id}`
pub async fn get<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<EventId>,
) -> Result<GetResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let event = state.event_store.find_by_id(id).await?.ok_or_else(|| {
        ApiError::from(GatherError::from(NotFoundError {
            entity: "Event",
            id: id.to_string(),
        }))
    })?;
    Ok(GetResponse::Ok(Json(event)))
}

/// `GET /api/events/{id}/registrations`
pub async fn registrations<S, N>(
    State(state): State<AppState<S, N>>,
    Path(id): Path<EventId>,
) -> Result<RegistrationsResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    state.event_store.find_by_id(id).await?.ok_or_else(|| {
        ApiError::from(GatherError::from(NotFoundError {
            entity: "Event",
            id: id.to_string(),
        }))
    })?;
    let registrations = state.event_store.find_registrations_by_event(id).await?;
    Ok(RegistrationsResponse::Ok(Json(registrations)))
}
