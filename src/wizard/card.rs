use super::WizardError;
use crate::rsvp::guest::SYNTHETIC_ID_PREFIX;
use crate::rsvp::{EventDay, Guest, GuestEdit, RsvpStatus};

pub const PLACEHOLDER_NAME: &str = "Test Guest";

/// Form state for one guest. Attendance and dietary answers are kept
/// while hidden so flipping the status back to "Yes" restores them.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestCard {
    pub id: String,
    pub name: String,
    rsvp_status: Option<RsvpStatus>,
    event_attendance: Vec<EventDay>,
    dietary_requirements: String,
    read_only: bool,
}

impl GuestCard {
    pub fn from_guest(guest: &Guest, read_only: bool) -> Self {
        let event_attendance = if guest.event_attendance.is_empty() {
            vec![EventDay::Saturday]
        } else {
            guest.event_attendance.clone()
        };
        Self {
            id: guest.id.clone(),
            name: guest.name.clone(),
            rsvp_status: guest.rsvp_status,
            event_attendance,
            dietary_requirements: guest.dietary_requirements.clone(),
            read_only,
        }
    }

    /// Card shown when an invitation has no guest records
    pub fn placeholder() -> Self {
        Self {
            id: format!("{}id", SYNTHETIC_ID_PREFIX),
            name: PLACEHOLDER_NAME.to_string(),
            rsvp_status: None,
            event_attendance: vec![EventDay::Saturday],
            dietary_requirements: String::new(),
            read_only: false,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub(super) fn lock(&mut self) {
        self.read_only = true;
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.starts_with(SYNTHETIC_ID_PREFIX)
    }

    pub fn rsvp_status(&self) -> Option<RsvpStatus> {
        self.rsvp_status
    }

    pub fn event_attendance(&self) -> &[EventDay] {
        &self.event_attendance
    }

    pub fn dietary_requirements(&self) -> &str {
        &self.dietary_requirements
    }

    /// Attendance and dietary controls only show for attending guests
    pub fn shows_event_fields(&self) -> bool {
        self.rsvp_status == Some(RsvpStatus::Yes)
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.read_only {
            Err(WizardError::ReadOnly)
        } else {
            Ok(())
        }
    }

    pub fn set_status(&mut self, status: RsvpStatus) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.rsvp_status = Some(status);
        Ok(())
    }

    pub fn set_attending(&mut self, day: EventDay, attending: bool) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.event_attendance.retain(|d| *d != day);
        if attending {
            self.event_attendance.push(day);
            self.event_attendance.sort();
        }
        Ok(())
    }

    pub fn set_dietary(&mut self, note: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.dietary_requirements = note.to_string();
        Ok(())
    }

    /// The answers as they are sent to the server. Hidden answers are
    /// dropped here rather than when the status changes.
    pub fn to_edit(&self) -> Result<GuestEdit, WizardError> {
        let Some(status) = self.rsvp_status else {
            return Err(WizardError::MissingStatus(self.name.clone()));
        };
        Ok(GuestEdit {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            rsvp_status: Some(status),
            event_attendance: self.event_attendance.clone(),
            dietary_requirements: self.dietary_requirements.clone(),
        }
        .normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest() -> Guest {
        Guest {
            id: "recGuest1".to_string(),
            name: "Alice".to_string(),
            rsvp_status: None,
            event_attendance: vec![],
            dietary_requirements: String::new(),
        }
    }

    #[test]
    fn it_preselects_saturday() {
        let card = GuestCard::from_guest(&guest(), false);
        assert_eq!(card.event_attendance(), &[EventDay::Saturday]);
        assert!(!card.shows_event_fields());
    }

    #[test]
    fn it_keeps_hidden_answers_until_submitted() {
        let mut card = GuestCard::from_guest(&guest(), false);
        card.set_status(RsvpStatus::Yes).unwrap();
        card.set_attending(EventDay::Friday, true).unwrap();
        card.set_dietary("Vegan").unwrap();

        card.set_status(RsvpStatus::No).unwrap();
        assert!(!card.shows_event_fields());
        assert_eq!(card.dietary_requirements(), "Vegan");
        let edit = card.to_edit().unwrap();
        assert!(edit.event_attendance.is_empty());
        assert_eq!(edit.dietary_requirements, "");

        card.set_status(RsvpStatus::Yes).unwrap();
        let edit = card.to_edit().unwrap();
        assert_eq!(
            edit.event_attendance,
            vec![EventDay::Friday, EventDay::Saturday]
        );
        assert_eq!(edit.dietary_requirements, "Vegan");
    }

    #[test]
    fn it_requires_a_status() {
        let card = GuestCard::from_guest(&guest(), false);
        assert_eq!(
            card.to_edit(),
            Err(WizardError::MissingStatus("Alice".to_string()))
        );
    }

    #[test]
    fn it_refuses_edits_when_read_only() {
        let mut card = GuestCard::from_guest(&guest(), true);
        assert_eq!(card.set_status(RsvpStatus::Yes), Err(WizardError::ReadOnly));
        assert_eq!(
            card.set_attending(EventDay::Sunday, true),
            Err(WizardError::ReadOnly)
        );
        assert_eq!(card.set_dietary("x"), Err(WizardError::ReadOnly));
    }

    #[test]
    fn it_builds_a_placeholder() {
        let card = GuestCard::placeholder();
        assert_eq!(card.id, "test-id");
        assert_eq!(card.name, PLACEHOLDER_NAME);
        assert!(card.is_placeholder());
    }
}
