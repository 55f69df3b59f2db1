use std::env;

use anyhow::{Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub airtable_api_url: String,
    pub airtable_token: String,
    pub airtable_base_id: String,
    pub invites_table: String,
    pub guests_table: String,
    pub static_dir: String,
}

impl AppConfig {
    /// Load configuration from the environment, reading a `.env` file
    /// first if one exists in the working directory.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine, the variables may come from the
        // real environment
        let _ = dotenvy::dotenv();

        let airtable_token = env::var("AIRTABLE_PERSONAL_ACCESS_TOKEN")
            .context("Missing env var AIRTABLE_PERSONAL_ACCESS_TOKEN")?;
        let airtable_base_id =
            env::var("AIRTABLE_BASE_ID").context("Missing env var AIRTABLE_BASE_ID")?;
        let airtable_api_url = env::var("RSVP_AIRTABLE_API_URL")
            .unwrap_or_else(|_| "https://api.airtable.com".to_string());
        let invites_table =
            env::var("RSVP_INVITES_TABLE").unwrap_or_else(|_| "Invites".to_string());
        let guests_table = env::var("RSVP_GUESTS_TABLE").unwrap_or_else(|_| "Guests".to_string());
        let static_dir = env::var("RSVP_STATIC_DIR").unwrap_or_else(|_| "./public".to_string());

        Ok(Self {
            airtable_api_url,
            airtable_token,
            airtable_base_id,
            invites_table,
            guests_table,
            static_dir,
        })
    }
}
