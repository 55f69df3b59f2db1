//! The fixed wedding weekend: three named days, each with one event.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub struct WeddingDetails {
    pub title: &'static str,
    pub date_label: &'static str,
    pub location: &'static str,
    pub organizer: &'static str,
    pub organizer_email: &'static str,
    pub url: &'static str,
    pub rsvp_url: &'static str,
    pub timezone: &'static str,
}

pub const WEDDING: WeddingDetails = WeddingDetails {
    title: "Tim & Aoife's Wedding",
    date_label: "July 5, 2025",
    location: "Ballymaloe House",
    organizer: "Tim & Aoife",
    organizer_email: "wedding@timandaoife.com",
    url: "https://timandaoife.com",
    rsvp_url: "https://rsvp.timandaoife.com",
    timezone: "Europe/Dublin",
};

pub struct EventDetails {
    pub title: &'static str,
    pub description: &'static str,
    pub location: &'static str,
    /// `YYYY-MM-DD`
    pub date: &'static str,
    /// `HH:MM`, local to the wedding timezone
    pub start_time: &'static str,
    pub end_time: &'static str,
}

const FRIDAY: EventDetails = EventDetails {
    title: "Welcome Drinks & Dinner",
    description: "Welcome drinks and casual dinner at Ballymaloe House",
    location: "Ballymaloe House",
    date: "2025-07-04",
    start_time: "19:00",
    end_time: "22:00",
};

const SATURDAY: EventDetails = EventDetails {
    title: "Wedding Ceremony & Reception",
    description: "Wedding ceremony and reception at Ballymaloe House",
    location: "Ballymaloe House",
    date: "2025-07-05",
    start_time: "14:30",
    end_time: "23:59",
};

const SUNDAY: EventDetails = EventDetails {
    title: "Farewell Brunch",
    description: "Farewell brunch at Ballymaloe House",
    location: "Ballymaloe House",
    date: "2025-07-06",
    start_time: "11:00",
    end_time: "14:00",
};

/// Ordered chronologically so sorting a set of days gives the order
/// of the weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventDay {
    Friday,
    Saturday,
    Sunday,
}

impl EventDay {
    pub const ALL: [EventDay; 3] = [EventDay::Friday, EventDay::Saturday, EventDay::Sunday];

    pub fn name(&self) -> &'static str {
        match self {
            EventDay::Friday => "Friday",
            EventDay::Saturday => "Saturday",
            EventDay::Sunday => "Sunday",
        }
    }

    pub fn details(&self) -> &'static EventDetails {
        match self {
            EventDay::Friday => &FRIDAY,
            EventDay::Saturday => &SATURDAY,
            EventDay::Sunday => &SUNDAY,
        }
    }
}

impl fmt::Display for EventDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event day: {0}")]
pub struct UnknownEventDay(pub String);

impl FromStr for EventDay {
    type Err = UnknownEventDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventDay::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEventDay(s.to_string()))
    }
}

/// Sorted, deduplicated copy of `days`
pub fn distinct_days(days: &[EventDay]) -> Vec<EventDay> {
    let mut out = days.to_vec();
    out.sort();
    out.dedup();
    out
}

/// Comma separated day names, e.g. "Friday, Saturday"
pub fn join_days(days: &[EventDay]) -> String {
    days.iter()
        .map(EventDay::name)
        .collect::<Vec<_>>()
        .join(", ")
}
