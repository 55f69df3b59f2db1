//! API routes module

pub mod calendar;
pub mod invitation;
pub mod rsvp;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // PIN lookup
        .nest("/invitation", invitation::router())
        // RSVP submission
        .nest("/rsvp", rsvp::router())
        // Calendar file downloads
        .nest("/calendar", calendar::router())
}
