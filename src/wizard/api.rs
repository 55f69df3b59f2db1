//! Client side of the RSVP HTTP API

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::api::public::rsvp::RsvpResponse;
use crate::rsvp::{Invitation, Pin, RsvpSubmission};

#[async_trait]
pub trait RsvpApi: Send + Sync {
    async fn fetch_invitation(&self, pin: &Pin) -> Result<Invitation>;

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<RsvpResponse>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone, Debug)]
pub struct HttpRsvpApi {
    client: Client,
    base_url: String,
}

impl HttpRsvpApi {
    /// `base_url` points at the API root, e.g. `http://localhost:3000/api`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Surface the server's `{"error": ...}` message when there is one
async fn error_from(resp: Response, fallback: &str) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) => anyhow!(body.error),
        Err(_) => anyhow!("{} (Status: {})", fallback, status.as_u16()),
    }
}

#[async_trait]
impl RsvpApi for HttpRsvpApi {
    async fn fetch_invitation(&self, pin: &Pin) -> Result<Invitation> {
        let url = format!(
            "{}/invitation/{}",
            self.base_url,
            urlencoding::encode(pin.as_str())
        );
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp, "Failed to find invitation").await);
        }
        Ok(resp.json::<Invitation>().await?)
    }

    async fn submit_rsvp(&self, submission: &RsvpSubmission) -> Result<RsvpResponse> {
        let url = format!("{}/rsvp", self.base_url);
        let resp = self.client.post(url).json(submission).send().await?;
        if !resp.status().is_success() {
            return Err(error_from(resp, "Failed to submit RSVP").await);
        }
        Ok(resp.json::<RsvpResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn it_fetches_an_invitation() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/invitation/AB12")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "inviteId": "recInvite1",
                    "inviteDetails": {"PIN": "AB12"},
                    "guests": [{
                        "id": "recGuest1",
                        "name": "Alice",
                        "rsvpStatus": null,
                        "eventAttendance": [],
                        "dietaryRequirements": ""
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let api = HttpRsvpApi::new(&format!("{}/api/", server.url()));
        let invitation = api
            .fetch_invitation(&Pin::parse("ab12").unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(invitation.invite_id, "recInvite1");
        assert_eq!(invitation.guests[0].name, "Alice");
    }

    #[tokio::test]
    async fn it_surfaces_the_server_error_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/invitation/ZZ99")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invitation not found"}"#)
            .create_async()
            .await;

        let api = HttpRsvpApi::new(&format!("{}/api", server.url()));
        let err = api
            .fetch_invitation(&Pin::parse("ZZ99").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invitation not found");
    }

    #[tokio::test]
    async fn it_reports_the_status_without_an_error_body() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/rsvp")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let api = HttpRsvpApi::new(&format!("{}/api", server.url()));
        let submission = RsvpSubmission {
            invite_id: "recInvite1".to_string(),
            guests: vec![],
        };
        let err = api.submit_rsvp(&submission).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to submit RSVP (Status: 502)");
    }
}
