use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted record. Records with a `text` field are journal entries,
/// records with a `mood` field are check-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Journal(JournalEntry),
    Mood(MoodCheckIn),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub analysis: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCheckIn {
    pub id: i64,
    pub mood: String,
    pub date: String,
}

impl Entry {
    pub fn new_journal(text: String, analysis: String, date_format: &str) -> Self {
        let now = Local::now();
        Entry::Journal(JournalEntry {
            id: entry_id(&now),
            text,
            analysis,
            date: format_date(&now, date_format),
        })
    }

    pub fn new_mood(mood: String, date_format: &str) -> Self {
        let now = Local::now();
        Entry::Mood(MoodCheckIn {
            id: entry_id(&now),
            mood,
            date: format_date(&now, date_format),
        })
    }

    pub fn id(&self) -> i64 {
        match self {
            Entry::Journal(e) => e.id,
            Entry::Mood(e) => e.id,
        }
    }

    pub fn date(&self) -> &str {
        match self {
            Entry::Journal(e) => &e.date,
            Entry::Mood(e) => &e.date,
        }
    }

    /// One-line summary used by list views and `--print`.
    pub fn summary(&self) -> String {
        match self {
            Entry::Journal(e) => format!("{}: {}", e.date, e.text.lines().next().unwrap_or("")),
            Entry::Mood(e) => format!("{}: Mood: {}", e.date, e.mood),
        }
    }
}

// chrono reports bad format items as fmt::Error, which `to_string` would panic on.
fn format_date(now: &DateTime<Local>, date_format: &str) -> String {
    let mut date = String::new();
    if write!(date, "{}", now.format(date_format)).is_err() {
        log::warn!("Invalid date format {:?}, using {}", date_format, FALLBACK_DATE_FORMAT);
        date.clear();
        let _ = write!(date, "{}", now.format(FALLBACK_DATE_FORMAT));
    }
    date
}

// Millisecond timestamps; two entries created in the same millisecond share an id.
fn entry_id(now: &DateTime<Local>) -> i64 {
    now.timestamp_millis()
}
