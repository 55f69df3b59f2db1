use anyhow::Result;

use crate::airtable::{AirtableClient, ListQuery, RecordStore};
use crate::core::AppConfig;

pub async fn run(config: &AppConfig, table: &str, limit: usize) -> Result<()> {
    let client = AirtableClient::from_config(config);
    let records = client
        .list_records(table, &ListQuery::default().max_records(limit))
        .await?;

    println!("{} records from {}", records.len(), table);
    for record in records {
        println!("\nID: {}", record.id);
        println!("{}", serde_json::to_string_pretty(&record.fields)?);
    }
    Ok(())
}
