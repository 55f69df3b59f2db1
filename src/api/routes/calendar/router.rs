//! Router for the calendar API

use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::rsvp::EventDay;
use crate::rsvp::calendar::{CONTENT_TYPE, build_calendar};

async fn calendar_handler(
    Query(params): Query<public::CalendarQuery>,
) -> Result<Response, ApiError> {
    let days = params
        .events
        .iter()
        .map(|name| name.parse::<EventDay>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::bad_request(&e.to_string()))?;

    let Some(file) = build_calendar(&days, chrono::Utc::now()) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.file_name))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    )
        .into_response())
}

/// Create the calendar router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(calendar_handler))
}
