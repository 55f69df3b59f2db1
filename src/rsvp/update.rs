//! Best-effort write of RSVP answers back to the guest table.
//!
//! The guest table's columns are named and typed differently between
//! bases, so a write is an ordered list of partial updates rather than
//! one transaction. The first attempt carries the status and the
//! dietary note (with the attendance summary appended); the per-day
//! columns follow one at a time. Every attempt records its outcome and
//! none of them fail the submission.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::TableNames;
use super::event::EventDay;
use super::guest::{GuestEdit, fields};
use crate::airtable::{Fields, RecordStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptKind {
    /// Status plus dietary note
    Combined,
    Attendance(EventDay),
    /// Single field write used by the field probing diagnostics
    Probe(String),
}

impl fmt::Display for AttemptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptKind::Combined => f.write_str("status and dietary"),
            AttemptKind::Attendance(day) => write!(f, "{} attendance", day),
            AttemptKind::Probe(field) => write!(f, "field {:?}", field),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAttempt {
    pub kind: AttemptKind,
    pub fields: Fields,
}

impl UpdateAttempt {
    pub fn probe(field: &str, value: Value) -> Self {
        let mut fields = Fields::new();
        fields.insert(field.to_string(), value);
        Self {
            kind: AttemptKind::Probe(field.to_string()),
            fields,
        }
    }

    /// Send this attempt to the store. Errors become a rejected
    /// outcome, they are never returned.
    pub async fn run(
        &self,
        store: &dyn RecordStore,
        table: &str,
        record_id: &str,
    ) -> AttemptOutcome {
        match store
            .update_record(table, record_id, self.fields.clone())
            .await
        {
            Ok(_) => {
                tracing::info!("Updated {} for guest {}", self.kind, record_id);
                AttemptOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Could not update {} for guest {}: {}", self.kind, record_id, e);
                AttemptOutcome::Rejected(e.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Applied,
    Rejected(String),
    /// Not sent because an earlier attempt it depends on was rejected
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub kind: AttemptKind,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub guest_id: String,
    pub attempts: Vec<UpdateAttempt>,
}

impl UpdatePlan {
    pub fn for_guest(edit: &GuestEdit) -> Self {
        let edit = edit.clone().normalized();

        let mut combined = Fields::new();
        if let Some(status) = edit.rsvp_status {
            combined.insert(fields::RSVP_STATUS.to_string(), json!(status.as_str()));
        }
        combined.insert(
            fields::DIETARY.to_string(),
            json!(edit.dietary_with_attendance()),
        );

        let mut attempts = vec![UpdateAttempt {
            kind: AttemptKind::Combined,
            fields: combined,
        }];

        for day in EventDay::ALL {
            let attending = if edit.event_attendance.contains(&day) {
                "Yes"
            } else {
                "No"
            };
            let mut fields = Fields::new();
            fields.insert(day.attendance_field().to_string(), json!(attending));
            attempts.push(UpdateAttempt {
                kind: AttemptKind::Attendance(day),
                fields,
            });
        }

        Self {
            guest_id: edit.id,
            attempts,
        }
    }

    /// Run the attempts in order. Per-day attempts are independent of
    /// each other but are skipped once the combined attempt is rejected.
    pub async fn execute(&self, store: &dyn RecordStore, table: &str) -> Vec<AttemptReport> {
        let mut reports = Vec::with_capacity(self.attempts.len());
        let mut combined_rejected = false;

        for attempt in &self.attempts {
            let outcome = if combined_rejected && attempt.kind != AttemptKind::Combined {
                AttemptOutcome::Skipped
            } else {
                attempt.run(store, table, &self.guest_id).await
            };

            if attempt.kind == AttemptKind::Combined
                && matches!(outcome, AttemptOutcome::Rejected(_))
            {
                combined_rejected = true;
            }

            reports.push(AttemptReport {
                kind: attempt.kind.clone(),
                outcome,
            });
        }

        reports
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub invite_id: String,
    pub guests: Vec<GuestEdit>,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid request data")]
    Malformed(#[source] serde_json::Error),
    #[error("Invalid request data")]
    MissingInviteId,
}

impl RsvpSubmission {
    /// Parse a request body, rejecting anything structurally off:
    /// missing or empty invite id, a missing or non-array guest list,
    /// a guest without an id, or an unknown event day.
    pub fn from_slice(body: &[u8]) -> Result<Self, SubmissionError> {
        let submission: RsvpSubmission =
            serde_json::from_slice(body).map_err(SubmissionError::Malformed)?;
        if submission.invite_id.trim().is_empty() {
            return Err(SubmissionError::MissingInviteId);
        }
        Ok(submission)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuestReport {
    pub guest_id: String,
    pub attempts: Vec<AttemptReport>,
}

impl GuestReport {
    pub fn fully_applied(&self) -> bool {
        self.attempts
            .iter()
            .all(|a| a.outcome == AttemptOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionReport {
    /// Placeholder guests dropped without touching the store
    pub discarded: usize,
    pub guests: Vec<GuestReport>,
}

/// Write every real guest of the submission. Concurrent submissions for
/// the same guest are not coordinated, the last write wins per field.
pub async fn apply_submission(
    store: &dyn RecordStore,
    tables: &TableNames,
    submission: &RsvpSubmission,
) -> SubmissionReport {
    let (synthetic, real): (Vec<&GuestEdit>, Vec<&GuestEdit>) =
        submission.guests.iter().partition(|g| g.is_synthetic());

    if !synthetic.is_empty() {
        tracing::debug!("Discarding {} placeholder guests", synthetic.len());
    }
    tracing::info!(
        "Applying RSVP for invite {} with {} guests",
        submission.invite_id,
        real.len()
    );

    let mut report = SubmissionReport {
        discarded: synthetic.len(),
        guests: Vec::with_capacity(real.len()),
    };

    for edit in real {
        let plan = UpdatePlan::for_guest(edit);
        let attempts = plan.execute(store, &tables.guests).await;
        report.guests.push(GuestReport {
            guest_id: plan.guest_id,
            attempts,
        });
    }

    report
}
