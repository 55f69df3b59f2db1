use anyhow::Result;

use crate::airtable::{AirtableClient, ListQuery, RecordStore};
use crate::core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = AirtableClient::from_config(config);
    println!(
        "Connecting to base {} at {}",
        config.airtable_base_id, config.airtable_api_url
    );

    let records = client
        .list_records(&config.invites_table, &ListQuery::default().max_records(1))
        .await?;

    match records.first() {
        Some(record) => println!(
            "Connected. Found a record in {}: {}",
            config.invites_table, record.id
        ),
        None => println!("Connected. {} has no records", config.invites_table),
    }
    Ok(())
}
