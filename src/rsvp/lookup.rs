use serde::{Deserialize, Serialize};

use super::TableNames;
use super::guest::{Guest, fields};
use super::pin::{Pin, PinError};
use crate::airtable::{Fields, ListQuery, RecordStore, formula};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub invite_id: String,
    /// Raw fields of the invitation record
    pub invite_details: Fields,
    pub guests: Vec<Guest>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid PIN format")]
    InvalidPin(#[from] PinError),
    #[error("Invitation not found")]
    NotFound,
    #[error("Failed to fetch invitation details: {0}")]
    Store(anyhow::Error),
}

/// Find the invitation for `raw_pin` and the guests attached to it.
///
/// Guests are normally linked to the invitation record. Some rows were
/// imported with only the PIN filled in, so an empty link query falls
/// back to matching guests on the PIN directly.
pub async fn lookup_invitation(
    store: &dyn RecordStore,
    tables: &TableNames,
    raw_pin: &str,
) -> Result<Invitation, LookupError> {
    let pin = Pin::parse(raw_pin)?;
    tracing::debug!("Looking up invitation for PIN {}", pin);

    let by_pin = formula::field_equals(fields::PIN, pin.as_str());
    let invites = store
        .list_records(&tables.invites, &ListQuery::filter(&by_pin).max_records(1))
        .await
        .map_err(LookupError::Store)?;
    let Some(invite) = invites.into_iter().next() else {
        return Err(LookupError::NotFound);
    };

    let by_link = formula::field_equals(fields::INVITE_LINK, &invite.id);
    let mut guests = store
        .list_records(&tables.guests, &ListQuery::filter(by_link))
        .await
        .map_err(LookupError::Store)?;
    tracing::debug!("Found {} guests linked to {}", guests.len(), invite.id);

    if guests.is_empty() {
        guests = store
            .list_records(&tables.guests, &ListQuery::filter(by_pin))
            .await
            .map_err(LookupError::Store)?;
        tracing::debug!("Found {} guests by PIN {}", guests.len(), pin);
    }

    Ok(Invitation {
        invite_id: invite.id,
        invite_details: invite.fields,
        guests: guests.iter().map(Guest::from_record).collect(),
    })
}
