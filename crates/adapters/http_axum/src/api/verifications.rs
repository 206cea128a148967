//! JSON REST handler for verification submissions.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use gather_app::ports::{EventStore, Notifier};
use gather_domain::id::{EventId, RegistrationId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for submitting a verification code.
#[derive(Deserialize)]
pub struct VerifyRequest {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub code: String,
}

/// JSON body returned on a successful verification.
#[derive(Serialize)]
pub struct VerifiedBody {
    success: bool,
    message: &'static str,
}

/// Possible responses from the verification endpoint.
pub enum CreateResponse {
    Ok(Json<VerifiedBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/verifications`
pub async fn create<S, N>(
    State(state): State<AppState<S, N>>,
    Json(req): Json<VerifyRequest>,
) -> Result<CreateResponse, ApiError>
where
    S: EventStore + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    state
        .verifier
        .verify(req.event_id, req.registration_id, &req.code)
        .await?;

    Ok(CreateResponse::Ok(Json(VerifiedBody {
        success: true,
        message: "Registration verified successfully",
    })))
}
