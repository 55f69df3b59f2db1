//! iCalendar (RFC 5545) files for the events a guest is attending.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::event::{EventDay, WEDDING, distinct_days};

pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
pub const COMBINED_FILE_NAME: &str = "Tim_and_Aoife_Wedding.ics";

const PRODID: &str = "-//Tim & Aoife Wedding//RSVP App//EN";
const UID_DOMAIN: &str = "timandaoife.com";
/// Content lines longer than this many octets must be folded
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarFile {
    pub file_name: String,
    pub content: String,
    pub events: Vec<EventDay>,
}

impl CalendarFile {
    /// Path of the download endpoint serving this file
    pub fn download_path(&self) -> String {
        let query = self
            .events
            .iter()
            .map(|day| format!("events={}", day.name()))
            .collect::<Vec<_>>()
            .join("&");
        format!("/api/calendar?{}", query)
    }
}

/// Build the calendar file for a set of attended days. Returns `None`
/// when there is nothing to add. One day gives a file named after its
/// event, several days give one combined file with an event per day.
pub fn build_calendar(days: &[EventDay], now: DateTime<Utc>) -> Option<CalendarFile> {
    let days = distinct_days(days);
    let first = *days.first()?;

    let file_name = if days.len() == 1 {
        format!(
            "Tim_and_Aoife_{}.ics",
            first
                .details()
                .title
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        )
    } else {
        COMBINED_FILE_NAME.to_string()
    };

    let stamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("PRODID:{}", PRODID),
        format!("X-WR-TIMEZONE:{}", WEDDING.timezone),
    ];
    for day in &days {
        lines.extend(event_lines(*day, &stamp));
    }
    lines.push("END:VCALENDAR".to_string());

    let content = lines
        .iter()
        .map(|line| fold_line(line))
        .collect::<Vec<_>>()
        .join("\r\n");

    Some(CalendarFile {
        file_name,
        content,
        events: days,
    })
}

fn event_lines(day: EventDay, stamp: &str) -> Vec<String> {
    let event = day.details();
    vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:event-{}@{}", Uuid::new_v4(), UID_DOMAIN),
        format!("SUMMARY:{}", escape_text(event.title)),
        format!("DTSTAMP:{}", stamp),
        format!("DTSTART:{}", local_time(event.date, event.start_time)),
        format!("DTEND:{}", local_time(event.date, event.end_time)),
        format!("DESCRIPTION:{}", escape_text(event.description)),
        format!("LOCATION:{}", escape_text(event.location)),
        format!("URL:{}", WEDDING.url),
        format!(
            "ORGANIZER;CN={}:mailto:{}",
            param_value(WEDDING.organizer),
            WEDDING.organizer_email
        ),
        "STATUS:CONFIRMED".to_string(),
        "TRANSP:OPAQUE".to_string(),
        "END:VEVENT".to_string(),
    ]
}

/// `2025-07-05` and `14:30` become the floating local time
/// `20250705T143000`
fn local_time(date: &str, time: &str) -> String {
    format!("{}T{}00", date.replace('-', ""), time.replace(':', ""))
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

/// Parameter values containing separators must be quoted
fn param_value(value: &str) -> String {
    if value.contains([':', ';', ',']) {
        format!("\"{}\"", value.replace('"', ""))
    } else {
        value.to_string()
    }
}

/// Fold a content line so no physical line exceeds 75 octets, never
/// splitting a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out
}
