//! Public types for the invitation API

pub use crate::rsvp::{Guest, Invitation};
