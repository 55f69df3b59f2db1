//! Router for the invitation API

use axum::{Router, extract::Path, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::rsvp::lookup_invitation;

async fn invitation_handler(
    State(state): State<SharedState>,
    Path(pin): Path<String>,
) -> Result<Json<public::Invitation>, ApiError> {
    let invitation = lookup_invitation(state.store.as_ref(), &state.tables, &pin)
        .await
        .map_err(ApiError::from_lookup)?;
    Ok(Json(invitation))
}

/// Create the invitation router
pub fn router() -> Router<SharedState> {
    Router::new().route("/{pin}", axum::routing::get(invitation_handler))
}
