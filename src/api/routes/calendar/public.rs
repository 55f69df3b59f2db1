//! Public types for the calendar API
use serde::Deserialize;

/// `?events=Friday&events=Saturday`
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub events: Vec<String>,
}
