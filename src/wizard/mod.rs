//! The guest facing RSVP flow as a state machine.
//!
//! Screens go PIN entry, guest form, confirmation and optionally the
//! update request form. Every transition is a method on `Wizard`; the
//! terminal front end and the tests drive it the same way. Network
//! access goes through `RsvpApi` so it can be faked.

mod api;
mod card;
mod confirmation;
mod session;

pub use api::{HttpRsvpApi, RsvpApi};
pub use card::{GuestCard, PLACEHOLDER_NAME};
pub use confirmation::Confirmation;
pub use session::Session;

use crate::rsvp::update_request::{DeliverySimulator, UpdateRequest, UpdateRequestError};
use crate::rsvp::{Pin, RsvpSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PinEntry,
    GuestForm,
    Confirmation,
    UpdateRequest,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("Please enter a valid 4-character PIN")]
    InvalidPin,
    #[error("{0}")]
    Lookup(String),
    #[error("Please select an RSVP option for {0}")]
    MissingStatus(String),
    #[error("This RSVP has already been submitted")]
    ReadOnly,
    #[error("Error: {0}")]
    SubmitFailed(String),
    #[error("No guest card at position {0}")]
    NoSuchCard(usize),
    #[error("Not available from the {0:?} screen")]
    WrongScreen(Screen),
    #[error(transparent)]
    UpdateRequest(#[from] UpdateRequestError),
}

pub struct Wizard<A> {
    api: A,
    delivery: DeliverySimulator,
    screen: Screen,
    session: Option<Session>,
    cards: Vec<GuestCard>,
    pin_error: Option<String>,
    alert: Option<String>,
    confirmation: Option<Confirmation>,
}

impl<A: RsvpApi> Wizard<A> {
    pub fn new(api: A) -> Self {
        Self::with_delivery(api, DeliverySimulator::default())
    }

    pub fn with_delivery(api: A, delivery: DeliverySimulator) -> Self {
        Self {
            api,
            delivery,
            screen: Screen::PinEntry,
            session: None,
            cards: Vec::new(),
            pin_error: None,
            alert: None,
            confirmation: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn cards(&self) -> &[GuestCard] {
        &self.cards
    }

    /// Inline message under the PIN input
    pub fn pin_error(&self) -> Option<&str> {
        self.pin_error.as_deref()
    }

    /// Blocking message from the last failed submission
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn expect_screen(&self, screen: Screen) -> Result<(), WizardError> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(WizardError::WrongScreen(self.screen))
        }
    }

    /// Look up the invitation for `raw` and show its guest form. A
    /// malformed PIN never reaches the network.
    pub async fn submit_pin(&mut self, raw: &str) -> Result<(), WizardError> {
        self.expect_screen(Screen::PinEntry)?;
        self.pin_error = None;

        let Ok(pin) = Pin::parse(raw) else {
            let err = WizardError::InvalidPin;
            self.pin_error = Some(err.to_string());
            return Err(err);
        };

        let invitation = match self.api.fetch_invitation(&pin).await {
            Ok(invitation) => invitation,
            Err(e) => {
                let err = WizardError::Lookup(e.to_string());
                self.pin_error = Some(err.to_string());
                return Err(err);
            }
        };

        // Coming back with the same PIN keeps the submitted flag
        let session = match self.session.take() {
            Some(mut session) if session.is_for(&pin) => {
                session.invite_id = invitation.invite_id;
                session.guests = invitation.guests;
                session
            }
            _ => {
                self.confirmation = None;
                Session::new(pin, invitation)
            }
        };

        self.cards = if session.guests.is_empty() {
            let mut card = GuestCard::placeholder();
            if session.submitted {
                card.lock();
            }
            vec![card]
        } else {
            session
                .guests
                .iter()
                .map(|g| GuestCard::from_guest(g, session.submitted))
                .collect()
        };
        tracing::debug!(
            "Showing {} guest cards for invite {}",
            self.cards.len(),
            session.invite_id
        );

        self.session = Some(session);
        self.alert = None;
        self.screen = Screen::GuestForm;
        Ok(())
    }

    pub fn card_mut(&mut self, index: usize) -> Result<&mut GuestCard, WizardError> {
        self.expect_screen(Screen::GuestForm)?;
        self.cards
            .get_mut(index)
            .ok_or(WizardError::NoSuchCard(index))
    }

    /// Send the form. On any failure the form stays up with an alert.
    pub async fn submit(&mut self) -> Result<(), WizardError> {
        self.expect_screen(Screen::GuestForm)?;
        let result = self.try_submit().await;
        if let Err(e) = &result {
            self.alert = Some(e.to_string());
        }
        result
    }

    async fn try_submit(&mut self) -> Result<(), WizardError> {
        let Some(session) = self.session.as_ref() else {
            return Err(WizardError::WrongScreen(self.screen));
        };
        if session.submitted {
            return Err(WizardError::ReadOnly);
        }

        let edits = self
            .cards
            .iter()
            .map(GuestCard::to_edit)
            .collect::<Result<Vec<_>, _>>()?;

        // Placeholder cards have nothing upstream to update
        if self.cards.iter().any(|c| !c.is_placeholder()) {
            let submission = RsvpSubmission {
                invite_id: session.invite_id.clone(),
                guests: edits.clone(),
            };
            self.api
                .submit_rsvp(&submission)
                .await
                .map_err(|e| WizardError::SubmitFailed(e.to_string()))?;
        }

        let confirmation = Confirmation::build(&session.pin, &edits, chrono::Utc::now());
        if let Some(session) = self.session.as_mut() {
            session.submitted = true;
        }
        self.cards.iter_mut().for_each(GuestCard::lock);

        self.confirmation = Some(confirmation);
        self.alert = None;
        self.screen = Screen::Confirmation;
        Ok(())
    }

    /// Return to PIN entry from any screen. The session is kept so the
    /// same PIN shows the submitted answers again.
    pub fn back_to_pin(&mut self) {
        self.pin_error = None;
        self.alert = None;
        self.screen = Screen::PinEntry;
    }

    pub fn request_update(&mut self) -> Result<(), WizardError> {
        self.expect_screen(Screen::Confirmation)?;
        self.screen = Screen::UpdateRequest;
        Ok(())
    }

    pub fn back_to_confirmation(&mut self) -> Result<(), WizardError> {
        self.expect_screen(Screen::UpdateRequest)?;
        self.screen = Screen::Confirmation;
        Ok(())
    }

    pub async fn send_update_request(
        &mut self,
        request: &UpdateRequest,
    ) -> Result<(), WizardError> {
        self.expect_screen(Screen::UpdateRequest)?;
        let Some(confirmation) = self.confirmation.as_mut() else {
            return Err(WizardError::WrongScreen(self.screen));
        };
        confirmation
            .update_request
            .submit(request, &self.delivery)
            .await?;
        Ok(())
    }
}
