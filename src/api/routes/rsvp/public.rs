//! Public types for the RSVP API
use serde::{Deserialize, Serialize};

pub use crate::rsvp::{GuestEdit, RsvpSubmission};

pub const RECEIVED_MESSAGE: &str = "RSVP information received successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpResponse {
    pub success: bool,
    pub message: String,
}

impl RsvpResponse {
    pub fn received() -> Self {
        Self {
            success: true,
            message: RECEIVED_MESSAGE.to_string(),
        }
    }
}
