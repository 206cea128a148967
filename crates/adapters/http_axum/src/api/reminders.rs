//! JSON REST handler for manual reminder dispatch.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use gather_app::ports::{EventStore, Notifier};
use gather_app::services::selector::DEFAULT_HOURS_AHEAD;
use gather_domain::report::DispatchReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the dispatch endpoint.
///
/// A non-numeric `hours_ahead` is rejected by the extractor with a 400
/// before the handler runs; a negative or oversized one is rejected by
/// the selector.
#[derive(Deserialize)]
pub struct DispatchQuery {
    pub hours_ahead: Option<i64>,
}

/// Possible responses from the dispatch endpoint.
pub enum DispatchResponse {
    Ok(Json<DispatchReport>),
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/reminders/dispatch`
pub async fn dispatch<S, N>(
    State(state): State<AppState<S, N>>,
    Query(query): Query<DispatchQuery>,
) -> Result<DispatchResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let hours_ahead = query.hours_ahead.unwrap_or(DEFAULT_HOURS_AHEAD);
    let report = state.dispatcher.run(hours_ahead).await?;
    Ok(DispatchResponse::Ok(Json(report)))
}
