//! Test utilities for integration tests
#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use axum::{Router, body::Body};

use rsvp::api::AppState;
use rsvp::api::app;
use rsvp::core::AppConfig;

pub const BASE_ID: &str = "appTEST";
pub const TOKEN: &str = "test-token";

pub fn test_config(airtable_api_url: &str) -> AppConfig {
    AppConfig {
        airtable_api_url: airtable_api_url.to_string(),
        airtable_token: TOKEN.to_string(),
        airtable_base_id: BASE_ID.to_string(),
        invites_table: String::from("Invites"),
        guests_table: String::from("Guests"),
        static_dir: env::temp_dir().display().to_string(),
    }
}

/// Creates a test application router talking to a fake Airtable at
/// `airtable_api_url`, usually a `mockito` server.
pub fn test_app(airtable_api_url: &str) -> Router {
    let app_state = AppState::new(test_config(airtable_api_url));
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// Airtable's list response for the given records
pub fn records_body(records: serde_json::Value) -> String {
    serde_json::json!({ "records": records }).to_string()
}
