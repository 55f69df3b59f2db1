use chrono::{DateTime, Utc};

use crate::rsvp::calendar::{CalendarFile, build_calendar};
use crate::rsvp::event::join_days;
use crate::rsvp::sharing::{ShareLinks, ShareSummary, SharedGuest};
use crate::rsvp::update_request::UpdateRequestForm;
use crate::rsvp::{GuestEdit, Pin};

/// Everything shown after a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub guests: Vec<SharedGuest>,
    /// Union of the attending guests' days, `None` when nobody attends
    pub calendar: Option<CalendarFile>,
    pub share: ShareLinks,
    pub update_request: UpdateRequestForm,
}

impl Confirmation {
    pub fn build(pin: &Pin, edits: &[GuestEdit], now: DateTime<Utc>) -> Self {
        let guests: Vec<SharedGuest> = edits
            .iter()
            .map(|edit| {
                let name = edit.name.as_deref().unwrap_or_default();
                SharedGuest::from_edit(edit, name)
            })
            .collect();

        let days: Vec<_> = guests
            .iter()
            .filter(|g| g.attending)
            .flat_map(|g| g.events.iter().copied())
            .collect();

        let share = ShareSummary::new(pin.as_str(), guests.clone()).links();
        let update_request = UpdateRequestForm::new(
            pin.as_str(),
            guests.iter().map(|g| g.name.clone()).collect(),
        );

        Self {
            calendar: build_calendar(&days, now),
            share,
            update_request,
            guests,
        }
    }

    /// One block of lines per guest, headed by the guest's name
    pub fn blocks(&self) -> Vec<Vec<String>> {
        self.guests.iter().map(guest_block).collect()
    }
}

fn guest_block(guest: &SharedGuest) -> Vec<String> {
    let mut lines = vec![guest.name.clone()];
    if !guest.attending {
        lines.push("RSVP: Unable to attend".to_string());
        return lines;
    }

    lines.push("RSVP: Attending".to_string());
    if guest.events.is_empty() {
        lines.push("Events: None selected".to_string());
    } else {
        lines.push(format!("Events: {}", join_days(&guest.events)));
    }
    if !guest.dietary_requirements.is_empty() {
        lines.push(format!(
            "Dietary Requirements: {}",
            guest.dietary_requirements
        ));
    }
    lines
}
