use anyhow::Result;
use serde_json::{Value, json};

use crate::airtable::{AirtableClient, RecordStore};
use crate::core::AppConfig;
use crate::rsvp::update::{AttemptOutcome, UpdateAttempt};

/// Spellings seen across guest tables
const CANDIDATE_FIELDS: [&str; 16] = [
    "RSVP Status",
    "RSVP",
    "Status",
    "Attending",
    "Attending Friday?",
    "Friday",
    "Attending Friday",
    "Attending Saturday?",
    "Saturday",
    "Attending Saturday",
    "Attending Sunday?",
    "Sunday",
    "Attending Sunday",
    "Dietary",
    "Dietary Requirements",
    "Diet",
];

fn probe_value(field: &str) -> Value {
    if ["Friday", "Saturday", "Sunday"]
        .iter()
        .any(|day| field.contains(day))
    {
        json!(true)
    } else if field.contains("Dietary") {
        json!("Test dietary note")
    } else {
        json!("Yes")
    }
}

/// Write each candidate field on its own to `record_id` and report
/// which ones the table accepts. This changes the record.
pub async fn run(config: &AppConfig, record_id: &str, fields: Vec<String>) -> Result<()> {
    let client = AirtableClient::from_config(config);
    let table = &config.guests_table;
    let fields = if fields.is_empty() {
        CANDIDATE_FIELDS.iter().map(|f| f.to_string()).collect()
    } else {
        fields
    };

    let before = client.get_record(table, record_id).await?;
    println!("Probing {} fields on {} ({})", fields.len(), before.id, table);

    for field in &fields {
        let attempt = UpdateAttempt::probe(field, probe_value(field));
        match attempt.run(&client, table, record_id).await {
            AttemptOutcome::Applied => println!("OK      {}", field),
            AttemptOutcome::Rejected(reason) => println!("FAILED  {}: {}", field, reason),
            AttemptOutcome::Skipped => println!("SKIPPED {}", field),
        }
    }

    let after = client.get_record(table, record_id).await?;
    println!("\nRecord as stored:");
    println!("{}", serde_json::to_string_pretty(&after.fields)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_picks_a_value_by_field_kind() {
        assert_eq!(probe_value("Attending Sunday?"), json!(true));
        assert_eq!(probe_value("Dietary Requirements"), json!("Test dietary note"));
        assert_eq!(probe_value("RSVP"), json!("Yes"));
    }
}
