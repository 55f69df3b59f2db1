pub mod airtable;
pub mod api;
pub mod cli;
pub mod core;
pub mod rsvp;
pub mod wizard;
