//! Router for the RSVP API

use axum::{Router, body::Bytes, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::rsvp::apply_submission;

/// Accept an RSVP and write it through to the guest table. The body is
/// parsed by hand so every malformed shape gets the same 400.
async fn rsvp_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<public::RsvpResponse>, ApiError> {
    let submission = public::RsvpSubmission::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected RSVP body: {:?}", e);
        ApiError::bad_request(&e.to_string())
    })?;

    let report = apply_submission(state.store.as_ref(), &state.tables, &submission).await;
    let partial = report.guests.iter().filter(|g| !g.fully_applied()).count();
    if partial > 0 {
        tracing::warn!(
            "RSVP for invite {} partially applied for {} guests",
            submission.invite_id,
            partial
        );
    }

    Ok(Json(public::RsvpResponse::received()))
}

/// Create the RSVP router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(rsvp_handler))
}
