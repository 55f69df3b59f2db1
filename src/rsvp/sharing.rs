//! Plain text RSVP summary and the deep links built from it. Every
//! channel goes through `ShareSummary::render` so the wording is the
//! same everywhere.

use super::event::{EventDay, WEDDING, join_days};
use super::guest::GuestEdit;

#[derive(Debug, Clone, PartialEq)]
pub struct SharedGuest {
    pub name: String,
    pub attending: bool,
    pub events: Vec<EventDay>,
    pub dietary_requirements: String,
}

impl SharedGuest {
    pub fn from_edit(edit: &GuestEdit, name: &str) -> Self {
        let edit = edit.clone().normalized();
        Self {
            name: name.to_string(),
            attending: edit.is_attending(),
            events: edit.event_attendance,
            dietary_requirements: edit.dietary_requirements,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareSummary {
    pub pin: String,
    pub guests: Vec<SharedGuest>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareLinks {
    /// Canonical text, also offered for copying to the clipboard
    pub text: String,
    pub email: String,
    pub sms: String,
    pub whatsapp: String,
}

impl ShareSummary {
    pub fn new(pin: &str, guests: Vec<SharedGuest>) -> Self {
        Self {
            pin: pin.to_string(),
            guests,
        }
    }

    pub fn render(&self) -> String {
        let mut message = format!(
            "{}\n{} at {}\n\n",
            WEDDING.title, WEDDING.date_label, WEDDING.location
        );
        message.push_str(&format!("Your PIN: {}\n\n", self.pin));

        if !self.guests.is_empty() {
            message.push_str("RSVP Confirmation:\n");
            for guest in &self.guests {
                message.push_str(&format!("\n- {}\n", guest.name));
                if guest.attending {
                    message.push_str("  Status: Attending\n");
                    if !guest.events.is_empty() {
                        message.push_str(&format!("  Events: {}\n", join_days(&guest.events)));
                    }
                    if !guest.dietary_requirements.is_empty() {
                        message.push_str(&format!(
                            "  Dietary Requirements: {}\n",
                            guest.dietary_requirements
                        ));
                    }
                } else {
                    message.push_str("  Status: Not attending\n");
                }
            }
        }

        message.push_str(&format!(
            "\nView your RSVP details online: {}\n",
            WEDDING.rsvp_url
        ));
        message.push_str(
            "For any changes, please visit the RSVP site and use the \"Request Update\" button.\n",
        );
        message
    }

    pub fn links(&self) -> ShareLinks {
        let text = self.render();
        let body = urlencoding::encode(&text);
        let subject = format!("RSVP Confirmation - {}", WEDDING.title);

        ShareLinks {
            email: format!(
                "mailto:?subject={}&body={}",
                urlencoding::encode(&subject),
                body
            ),
            sms: format!("sms:?&body={}", body),
            whatsapp: format!("https://wa.me/?text={}", body),
            text,
        }
    }
}
