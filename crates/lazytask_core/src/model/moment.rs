//! Structured moments and the raw-or-structured time field.
//!
//! # Responsibility
//! - Parse the two accepted time formats (`yyyy-MM-dd HHmm`, `yyyy-MM-dd`).
//! - Render parsed moments in the display format used by task listings.
//!
//! # Invariants
//! - Parsing tries date+time before date-only.
//! - A field that fails both formats keeps its raw text and has no moment.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

/// Zero-padded `yyyy-MM-dd` with an optional ` HHmm`.
static MOMENT_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?: [0-9]{4})?$").expect("valid moment shape regex")
});

const DATE_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H%M";
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_DISPLAY_FORMAT: &str = "%b %-d %Y %H:%M";
const DATE_DISPLAY_FORMAT: &str = "%b %-d %Y";

/// Successfully parsed calendar date or date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Moment {
    /// Parses `yyyy-MM-dd HHmm`, falling back to `yyyy-MM-dd`.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if !MOMENT_SHAPE_RE.is_match(trimmed) {
            return None;
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_INPUT_FORMAT) {
            return Some(Self::DateTime(date_time));
        }
        NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
            .ok()
            .map(Self::Date)
    }

    /// Calendar date component.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime(date_time) => date_time.date(),
        }
    }

    /// Point in time used for ordering; date-only moments sit at midnight.
    pub fn as_date_time(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            Self::DateTime(date_time) => *date_time,
        }
    }
}

impl Display for Moment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(DATE_DISPLAY_FORMAT)),
            Self::DateTime(date_time) => {
                write!(f, "{}", date_time.format(DATE_TIME_DISPLAY_FORMAT))
            }
        }
    }
}

/// Parses a bare `yyyy-MM-dd` date (or the date part of `yyyy-MM-dd HHmm`).
pub fn parse_query_date(text: &str) -> Option<NaiveDate> {
    Moment::parse(text).map(|moment| moment.date())
}

/// Formats a calendar date the same way task listings do.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Time text entered by the user, with its best-effort parsed moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeField {
    Structured { raw: String, moment: Moment },
    Raw(String),
}

/// Comparison key for duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeKey {
    Moment(Moment),
    Text(String),
}

impl TimeField {
    /// Builds a field from user text; the text is trimmed and kept verbatim.
    pub fn parse(text: &str) -> Self {
        let raw = text.trim().to_string();
        match Moment::parse(&raw) {
            Some(moment) => Self::Structured { raw, moment },
            None => Self::Raw(raw),
        }
    }

    /// Original text as entered (trimmed).
    pub fn raw(&self) -> &str {
        match self {
            Self::Structured { raw, .. } => raw,
            Self::Raw(raw) => raw,
        }
    }

    pub fn moment(&self) -> Option<Moment> {
        match self {
            Self::Structured { moment, .. } => Some(*moment),
            Self::Raw(_) => None,
        }
    }

    pub fn key(&self) -> TimeKey {
        match self {
            Self::Structured { moment, .. } => TimeKey::Moment(*moment),
            Self::Raw(raw) => TimeKey::Text(raw.trim().to_lowercase()),
        }
    }

    /// Whether the structured date equals `date`; raw text never matches.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.moment().is_some_and(|moment| moment.date() == date)
    }
}

impl Display for TimeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured { moment, .. } => write!(f, "{moment}"),
            Self::Raw(raw) => write!(f, "{raw}"),
        }
    }
}
