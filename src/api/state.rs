use std::sync::Arc;

use crate::airtable::{AirtableClient, RecordStore};
use crate::core::AppConfig;
use crate::rsvp::TableNames;

/// Request handlers only read from the state so it is shared without a
/// lock
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
    pub tables: TableNames,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(AirtableClient::from_config(&config));
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        let tables = TableNames::from(&config);
        Self {
            config,
            store,
            tables,
        }
    }
}
