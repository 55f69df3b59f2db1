use crate::rsvp::{Guest, Invitation, Pin};

/// What the wizard remembers about the invitation it is working on.
/// Lives until a different PIN is entered.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub pin: Pin,
    pub invite_id: String,
    pub guests: Vec<Guest>,
    /// Set once the server acknowledged an RSVP for this invitation
    pub submitted: bool,
}

impl Session {
    pub fn new(pin: Pin, invitation: Invitation) -> Self {
        Self {
            pin,
            invite_id: invitation.invite_id,
            guests: invitation.guests,
            submitted: false,
        }
    }

    pub fn is_for(&self, pin: &Pin) -> bool {
        &self.pin == pin
    }
}
