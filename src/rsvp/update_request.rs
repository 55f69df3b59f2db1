//! Change requests for an RSVP that was already submitted. There is no
//! delivery channel yet: sending is simulated with a delay and a fixed
//! chance of failure so the retry path can be exercised.

use std::time::Duration;

use rand::Rng;

use super::event::WEDDING;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub name: String,
    pub email: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Editing,
    Sent,
    /// Delivery failed, the same request may be sent again
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateRequestError {
    #[error("Please fill out all fields")]
    Incomplete,
    #[error("{0} is not a guest on this invitation")]
    UnknownGuest(String),
    #[error("Your request has already been sent")]
    AlreadySent,
    #[error("There was an error sending your request. Please try again.")]
    DeliveryFailed,
}

#[derive(Debug, Clone)]
pub struct DeliverySimulator {
    pub success_rate: f64,
    pub delay: Duration,
}

impl Default for DeliverySimulator {
    fn default() -> Self {
        Self {
            success_rate: 0.9,
            delay: Duration::from_secs(1),
        }
    }
}

impl DeliverySimulator {
    pub fn roll<R: Rng>(&self, rng: &mut R) -> bool {
        rng.random_bool(self.success_rate.clamp(0.0, 1.0))
    }

    pub async fn deliver(&self, message: &ComposedRequest) -> Result<(), UpdateRequestError> {
        // The thread rng is not Send so roll before the await
        let delivered = self.roll(&mut rand::rng());
        tracing::info!("Sending update request to {}: {}", message.to, message.subject);
        tokio::time::sleep(self.delay).await;

        if delivered {
            Ok(())
        } else {
            tracing::warn!("Simulated delivery failure for {}", message.subject);
            Err(UpdateRequestError::DeliveryFailed)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequestForm {
    pin: String,
    guest_names: Vec<String>,
    state: RequestState,
}

impl UpdateRequestForm {
    pub fn new(pin: &str, guest_names: Vec<String>) -> Self {
        Self {
            pin: pin.to_string(),
            guest_names,
            state: RequestState::Editing,
        }
    }

    pub fn guest_names(&self) -> &[String] {
        &self.guest_names
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn compose(&self, request: &UpdateRequest) -> Result<ComposedRequest, UpdateRequestError> {
        let name = request.name.trim();
        let email = request.email.trim();
        let details = request.details.trim();
        if name.is_empty() || email.is_empty() || details.is_empty() {
            return Err(UpdateRequestError::Incomplete);
        }
        if !self.guest_names.iter().any(|n| n == name) {
            return Err(UpdateRequestError::UnknownGuest(name.to_string()));
        }

        Ok(ComposedRequest {
            to: WEDDING.organizer_email.to_string(),
            subject: format!("RSVP Update Request - PIN: {} - {}", self.pin, name),
            body: format!(
                "RSVP Update Request\n\nPIN: {}\nName: {}\nEmail: {}\n\nRequest Details:\n{}\n",
                self.pin, name, email, details
            ),
        })
    }

    pub async fn submit(
        &mut self,
        request: &UpdateRequest,
        delivery: &DeliverySimulator,
    ) -> Result<(), UpdateRequestError> {
        if self.state == RequestState::Sent {
            return Err(UpdateRequestError::AlreadySent);
        }
        let message = self.compose(request)?;

        match delivery.deliver(&message).await {
            Ok(()) => {
                self.state = RequestState::Sent;
                Ok(())
            }
            Err(e) => {
                self.state = RequestState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn form() -> UpdateRequestForm {
        UpdateRequestForm::new("AB12", vec!["Alice".to_string(), "Bob".to_string()])
    }

    fn request() -> UpdateRequest {
        UpdateRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            details: "Can we add Sunday?".to_string(),
        }
    }

    fn instant(success_rate: f64) -> DeliverySimulator {
        DeliverySimulator {
            success_rate,
            delay: Duration::ZERO,
        }
    }

    #[test]
    fn it_composes_the_request() {
        let message = form().compose(&request()).unwrap();
        assert_eq!(message.to, "wedding@timandaoife.com");
        assert_eq!(message.subject, "RSVP Update Request - PIN: AB12 - Alice");
        assert!(message.body.contains("Email: alice@example.com"));
        assert!(message.body.ends_with("Request Details:\nCan we add Sunday?\n"));
    }

    #[test]
    fn it_requires_every_field() {
        let mut incomplete = request();
        incomplete.details = "   ".to_string();
        assert_eq!(
            form().compose(&incomplete),
            Err(UpdateRequestError::Incomplete)
        );
    }

    #[test]
    fn it_requires_a_listed_guest() {
        let mut stranger = request();
        stranger.name = "Mallory".to_string();
        assert_eq!(
            form().compose(&stranger),
            Err(UpdateRequestError::UnknownGuest("Mallory".to_string()))
        );
    }

    #[test]
    fn it_mostly_succeeds() {
        let simulator = DeliverySimulator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let delivered = (0..1000).filter(|_| simulator.roll(&mut rng)).count();
        assert!(delivered > 800 && delivered < 980, "{}", delivered);
    }

    #[tokio::test]
    async fn it_marks_the_form_sent() {
        let mut form = form();
        form.submit(&request(), &instant(1.0)).await.unwrap();
        assert_eq!(form.state(), &RequestState::Sent);
        assert_eq!(
            form.submit(&request(), &instant(1.0)).await,
            Err(UpdateRequestError::AlreadySent)
        );
    }

    #[tokio::test]
    async fn it_allows_retrying_after_a_failure() {
        let mut form = form();
        let err = form.submit(&request(), &instant(0.0)).await.unwrap_err();
        assert_eq!(err, UpdateRequestError::DeliveryFailed);
        assert!(matches!(form.state(), RequestState::Failed(_)));

        form.submit(&request(), &instant(1.0)).await.unwrap();
        assert_eq!(form.state(), &RequestState::Sent);
    }
}
