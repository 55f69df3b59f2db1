use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::event::{EventDay, join_days};
use crate::airtable::Record;

/// Column names used by the Invites and Guests tables
pub mod fields {
    pub const PIN: &str = "PIN";
    pub const INVITE_LINK: &str = "Invite Link";
    pub const GUEST_NAME: &str = "Guest Name";
    pub const RSVP_STATUS: &str = "RSVP Status";
    pub const DIETARY: &str = "Dietary";
}

/// Name shown for a guest record without a name
pub const UNNAMED_GUEST: &str = "Guest";

/// Ids with this prefix belong to placeholder cards that never
/// existed upstream
pub const SYNTHETIC_ID_PREFIX: &str = "test-";

impl EventDay {
    pub fn attendance_field(&self) -> &'static str {
        match self {
            EventDay::Friday => "Attending Friday?",
            EventDay::Saturday => "Attending Saturday?",
            EventDay::Sunday => "Attending Sunday?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsvpStatus {
    Yes,
    No,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Yes => "Yes",
            RsvpStatus::No => "No",
        }
    }

    fn from_field(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(RsvpStatus::Yes),
            "No" => Some(RsvpStatus::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub name: String,
    pub rsvp_status: Option<RsvpStatus>,
    pub event_attendance: Vec<EventDay>,
    pub dietary_requirements: String,
}

/// Attendance columns are single selects holding "Yes" in most bases
/// but checkboxes in some.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == "Yes",
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

impl Guest {
    pub fn from_record(record: &Record) -> Self {
        // Anything other than Yes or No is read as not answered yet
        let rsvp_status = record.str_field(fields::RSVP_STATUS).and_then(|value| {
            let status = RsvpStatus::from_field(value);
            if status.is_none() {
                tracing::debug!("Ignoring unexpected RSVP status {:?} on {}", value, record.id);
            }
            status
        });

        let event_attendance = EventDay::ALL
            .into_iter()
            .filter(|day| is_truthy(record.fields.get(day.attendance_field())))
            .collect();

        Self {
            id: record.id.clone(),
            name: record
                .str_field(fields::GUEST_NAME)
                .unwrap_or(UNNAMED_GUEST)
                .to_string(),
            rsvp_status,
            event_attendance,
            dietary_requirements: record
                .str_field(fields::DIETARY)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn is_attending(&self) -> bool {
        self.rsvp_status == Some(RsvpStatus::Yes)
    }
}

/// Forms send `null` for answers hidden from the guest
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One guest's answers as submitted from the RSVP form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestEdit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_attendance: Vec<EventDay>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dietary_requirements: String,
}

impl GuestEdit {
    /// Drop the answers of a guest who declined and tidy the rest. An
    /// unanswered status keeps whatever was submitted.
    pub fn normalized(mut self) -> Self {
        if self.rsvp_status == Some(RsvpStatus::No) {
            self.event_attendance.clear();
            self.dietary_requirements.clear();
        } else {
            self.event_attendance = super::event::distinct_days(&self.event_attendance);
            self.dietary_requirements = self.dietary_requirements.trim().to_string();
        }
        self
    }

    pub fn is_synthetic(&self) -> bool {
        self.id.starts_with(SYNTHETIC_ID_PREFIX)
    }

    pub fn is_attending(&self) -> bool {
        self.rsvp_status == Some(RsvpStatus::Yes)
    }

    /// Text written to the dietary column. The attendance summary rides
    /// along so it survives even when the per-day columns reject writes.
    pub fn dietary_with_attendance(&self) -> String {
        let days = if self.event_attendance.is_empty() {
            "None".to_string()
        } else {
            join_days(&self.event_attendance)
        };
        let attendance = format!("Events: {}", days);
        if self.dietary_requirements.is_empty() {
            attendance
        } else {
            format!("{} | {}", self.dietary_requirements, attendance)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airtable::testing::record;
    use serde_json::json;

    #[test]
    fn it_reshapes_a_guest_record() {
        let rec = record(
            "recGuest1",
            json!({
                "Guest Name": "Alice",
                "RSVP Status": "Yes",
                "Attending Friday?": "Yes",
                "Attending Saturday?": "No",
                "Attending Sunday?": true,
                "Dietary": "Vegetarian"
            }),
        );
        let guest = Guest::from_record(&rec);

        assert_eq!(guest.id, "recGuest1");
        assert_eq!(guest.name, "Alice");
        assert_eq!(guest.rsvp_status, Some(RsvpStatus::Yes));
        assert_eq!(
            guest.event_attendance,
            vec![EventDay::Friday, EventDay::Sunday]
        );
        assert_eq!(guest.dietary_requirements, "Vegetarian");
    }

    #[test]
    fn it_falls_back_for_missing_fields() {
        let guest = Guest::from_record(&record("recGuest2", json!({})));

        assert_eq!(guest.name, UNNAMED_GUEST);
        assert_eq!(guest.rsvp_status, None);
        assert!(guest.event_attendance.is_empty());
        assert_eq!(guest.dietary_requirements, "");
    }

    #[test]
    fn it_serializes_in_camel_case() {
        let guest = Guest::from_record(&record("recGuest2", json!({"Guest Name": "Bob"})));
        let value = serde_json::to_value(&guest).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "recGuest2",
                "name": "Bob",
                "rsvpStatus": null,
                "eventAttendance": [],
                "dietaryRequirements": ""
            })
        );
    }

    #[test]
    fn it_ignores_hidden_answers_when_not_attending() {
        let edit = GuestEdit {
            id: "recGuest1".to_string(),
            name: None,
            rsvp_status: Some(RsvpStatus::No),
            event_attendance: vec![EventDay::Friday],
            dietary_requirements: "Vegan".to_string(),
        }
        .normalized();

        assert!(edit.event_attendance.is_empty());
        assert_eq!(edit.dietary_requirements, "");
        assert_eq!(edit.dietary_with_attendance(), "Events: None");
    }

    #[test]
    fn it_appends_attendance_to_the_dietary_note() {
        let edit = GuestEdit {
            id: "recGuest1".to_string(),
            name: None,
            rsvp_status: Some(RsvpStatus::Yes),
            event_attendance: vec![EventDay::Saturday, EventDay::Friday],
            dietary_requirements: " No nuts ".to_string(),
        }
        .normalized();

        assert_eq!(
            edit.dietary_with_attendance(),
            "No nuts | Events: Friday, Saturday"
        );
    }

    #[test]
    fn it_accepts_null_dietary_requirements() {
        let edit: GuestEdit = serde_json::from_value(json!({
            "id": "recGuest1",
            "rsvpStatus": "Yes",
            "eventAttendance": ["Saturday"],
            "dietaryRequirements": null
        }))
        .unwrap();
        assert_eq!(edit.dietary_requirements, "");
        assert!(!edit.is_synthetic());
    }

    #[test]
    fn it_accepts_null_attendance() {
        let edit: GuestEdit = serde_json::from_value(json!({
            "id": "recGuest1",
            "rsvpStatus": "No",
            "eventAttendance": null,
            "dietaryRequirements": ""
        }))
        .unwrap();
        assert!(edit.event_attendance.is_empty());
        assert_eq!(edit.rsvp_status, Some(RsvpStatus::No));
    }

    #[test]
    fn it_reads_unexpected_statuses_as_unanswered() {
        let guest = Guest::from_record(&record("recGuest3", json!({"RSVP Status": "Pending"})));
        assert_eq!(guest.rsvp_status, None);
    }

    #[test]
    fn it_keeps_answers_when_the_status_is_unset() {
        let edit = GuestEdit {
            id: "recGuest1".to_string(),
            name: None,
            rsvp_status: None,
            event_attendance: vec![EventDay::Sunday, EventDay::Friday, EventDay::Sunday],
            dietary_requirements: " Vegan ".to_string(),
        }
        .normalized();

        assert_eq!(edit.event_attendance, vec![EventDay::Friday, EventDay::Sunday]);
        assert_eq!(edit.dietary_requirements, "Vegan");
    }
}
