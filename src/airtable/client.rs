use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Fields, ListQuery, Record, RecordStore};
use crate::core::AppConfig;

/// Airtable caps a single page at 100 records
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    records: Vec<Record>,
    offset: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateRecordRequest {
    fields: Fields,
}

#[derive(Clone, Debug)]
pub struct AirtableClient {
    client: Client,
    api_url: String,
    base_id: String,
    token: String,
}

impl AirtableClient {
    pub fn new(api_url: &str, base_id: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id: base_id.to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.airtable_api_url,
            &config.airtable_base_id,
            &config.airtable_token,
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/v0/{}/{}",
            self.api_url,
            self.base_id,
            urlencoding::encode(table)
        )
    }

    fn record_url(&self, table: &str, id: &str) -> String {
        format!("{}/{}", self.table_url(table), urlencoding::encode(id))
    }
}

/// Pull a readable message out of an Airtable error body. Errors come
/// back either as `{"error": "NOT_FOUND"}` or as
/// `{"error": {"type": "...", "message": "..."}}`.
fn describe_error(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    match value.get("error") {
        Some(Value::String(kind)) => kind.clone(),
        Some(Value::Object(obj)) => {
            let kind = obj.get("type").and_then(Value::as_str).unwrap_or("UNKNOWN");
            match obj.get("message").and_then(Value::as_str) {
                Some(message) => format!("{}: {}", kind, message),
                None => kind.to_string(),
            }
        }
        _ => body.to_string(),
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(anyhow!(
        "Airtable {}: {}",
        status.as_u16(),
        describe_error(&body)
    ))
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn list_records(&self, table: &str, query: &ListQuery) -> Result<Vec<Record>> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut params: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(formula) = &query.filter_by_formula {
                params.push(("filterByFormula", formula.clone()));
            }
            if let Some(max_records) = query.max_records {
                params.push(("maxRecords", max_records.to_string()));
            }
            if let Some(offset) = &offset {
                params.push(("offset", offset.clone()));
            }

            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .query(&params)
                .send()
                .await?;
            let page: ListRecordsResponse = check_status(resp).await?.json().await?;
            records.extend(page.records);

            let limit_reached = query
                .max_records
                .is_some_and(|max_records| records.len() >= max_records);
            match page.offset {
                Some(next) if !limit_reached => offset = Some(next),
                _ => break,
            }
        }

        if let Some(max_records) = query.max_records {
            records.truncate(max_records);
        }

        Ok(records)
    }

    async fn get_record(&self, table: &str, id: &str) -> Result<Record> {
        let resp = self
            .client
            .get(self.record_url(table, id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }

    async fn update_record(&self, table: &str, id: &str, fields: Fields) -> Result<Record> {
        let resp = self
            .client
            .patch(self.record_url(table, id))
            .bearer_auth(&self.token)
            .json(&UpdateRecordRequest { fields })
            .send()
            .await?;
        Ok(check_status(resp).await?.json().await?)
    }
}
