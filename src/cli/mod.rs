use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod guest;
pub mod probe;
pub mod records;
pub mod serve;

use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port
        #[arg(long, env = "PORT", default_value = "3000")]
        port: String,
    },
    /// Check the Airtable connection by fetching one invitation
    Check {},
    /// Print the records of a table
    Records {
        #[arg(long, default_value = "Guests")]
        table: String,
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Try a single field update per candidate field name on one guest
    ProbeFields {
        /// Id of the guest record to write to
        #[arg(long)]
        record: String,
        /// Field names to try, defaults to the usual spellings
        #[arg(long = "field")]
        fields: Vec<String>,
    },
    /// Walk through the RSVP flow in the terminal
    Guest {
        #[arg(long, default_value = "http://localhost:3000/api")]
        api_url: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Check {}) => {
            check::run(&AppConfig::from_env()?).await?;
        }
        Some(Command::Records { table, limit }) => {
            records::run(&AppConfig::from_env()?, &table, limit).await?;
        }
        Some(Command::ProbeFields { record, fields }) => {
            probe::run(&AppConfig::from_env()?, &record, fields).await?;
        }
        Some(Command::Guest { api_url }) => {
            guest::run(&api_url).await?;
        }
        None => {}
    }

    Ok(())
}
