//! RSVP domain: invitation lookup, the best-effort guest update, and
//! the calendar, sharing and update request helpers that run off an
//! invitation already in memory.

pub mod calendar;
pub mod event;
pub mod guest;
pub mod lookup;
pub mod pin;
pub mod sharing;
pub mod update;
pub mod update_request;

pub use event::{EventDay, WEDDING};
pub use guest::{Guest, GuestEdit, RsvpStatus};
pub use lookup::{Invitation, LookupError, lookup_invitation};
pub use pin::{Pin, PinError};
pub use update::{RsvpSubmission, SubmissionReport, apply_submission};

use crate::core::AppConfig;

/// Names of the two tables the service reads and writes
#[derive(Clone, Debug, PartialEq)]
pub struct TableNames {
    pub invites: String,
    pub guests: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            invites: "Invites".to_string(),
            guests: "Guests".to_string(),
        }
    }
}

impl From<&AppConfig> for TableNames {
    fn from(config: &AppConfig) -> Self {
        Self {
            invites: config.invites_table.clone(),
            guests: config.guests_table.clone(),
        }
    }
}
