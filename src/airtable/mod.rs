//! Access to the Airtable records API, the only datastore the RSVP
//! service has. Everything above this module talks to the
//! `RecordStore` trait so the HTTP client can be swapped for a fake.

mod client;
pub mod formula;

pub use client::AirtableClient;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name to value map of a single record
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(
        rename = "createdTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Returns the field as a string if it holds one
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter_by_formula: Option<String>,
    pub max_records: Option<usize>,
}

impl ListQuery {
    pub fn filter(formula: impl Into<String>) -> Self {
        Self {
            filter_by_formula: Some(formula.into()),
            max_records: None,
        }
    }

    pub fn max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List the records of `table` matching the query, following
    /// pagination until `max_records` is reached or pages run out.
    async fn list_records(&self, table: &str, query: &ListQuery) -> Result<Vec<Record>>;

    async fn get_record(&self, table: &str, id: &str) -> Result<Record>;

    /// Partial update: only the given fields are written. The store may
    /// reject unknown field names or values of the wrong type.
    async fn update_record(&self, table: &str, id: &str, fields: Fields) -> Result<Record>;
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::{Fields, ListQuery, Record, RecordStore};

    /// In-memory store that answers list queries from canned results
    /// keyed by formula and records every update it receives.
    #[derive(Default)]
    pub struct MemoryStore {
        pub results: Vec<(String, String, Vec<Record>)>,
        pub rejected_fields: HashSet<String>,
        pub queries: Mutex<Vec<(String, Option<String>)>>,
        pub updates: Mutex<Vec<(String, String, Fields)>>,
        pub fail_lists: bool,
    }

    impl MemoryStore {
        pub fn with_result(mut self, table: &str, formula: &str, records: Vec<Record>) -> Self {
            self.results
                .push((table.to_string(), formula.to_string(), records));
            self
        }

        pub fn rejecting(mut self, field: &str) -> Self {
            self.rejected_fields.insert(field.to_string());
            self
        }

        pub fn query_count(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        pub fn updates(&self) -> Vec<(String, String, Fields)> {
            self.updates.lock().unwrap().clone()
        }
    }

    pub fn record(id: &str, fields: serde_json::Value) -> Record {
        Record {
            id: id.to_string(),
            created_time: None,
            fields: fields.as_object().cloned().unwrap_or_default(),
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn list_records(&self, table: &str, query: &ListQuery) -> Result<Vec<Record>> {
            self.queries
                .lock()
                .unwrap()
                .push((table.to_string(), query.filter_by_formula.clone()));
            if self.fail_lists {
                return Err(anyhow!("Airtable 503: SERVICE_UNAVAILABLE"));
            }
            let found = self
                .results
                .iter()
                .find(|(t, f, _)| t == table && Some(f) == query.filter_by_formula.as_ref())
                .map(|(_, _, records)| records.clone())
                .unwrap_or_default();
            Ok(found)
        }

        async fn get_record(&self, table: &str, id: &str) -> Result<Record> {
            self.results
                .iter()
                .filter(|(t, _, _)| t == table)
                .flat_map(|(_, _, records)| records.iter())
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("Airtable 404: NOT_FOUND"))
        }

        async fn update_record(&self, table: &str, id: &str, fields: Fields) -> Result<Record> {
            self.updates
                .lock()
                .unwrap()
                .push((table.to_string(), id.to_string(), fields.clone()));
            if let Some(name) = fields.keys().find(|k| self.rejected_fields.contains(*k)) {
                return Err(anyhow!(
                    "Airtable 422: UNKNOWN_FIELD_NAME: Unknown field name: \"{}\"",
                    name
                ));
            }
            Ok(Record {
                id: id.to_string(),
                created_time: None,
                fields,
            })
        }
    }
}
