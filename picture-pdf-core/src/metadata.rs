use chrono::{Datelike, Local, Timelike};

use crate::objects::{Dict, Object};

/// A local calendar instant with its UTC offset, as embedded in document
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    /// Absolute year, e.g. 2025.
    pub year: i32,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub day: u8,
    /// 0-6, 0 = Sunday.
    pub day_of_week: u8,
    /// 0-23.
    pub hour: u8,
    /// 0-59.
    pub minute: u8,
    /// 0-59.
    pub second: u8,
    /// Offset from UTC in minutes, east-positive.
    pub utc_offset_minutes: i32,
}

impl Timestamp {
    /// Snapshot the current local time. One read covers both the calendar
    /// fields and the UTC offset, so they always describe the same instant.
    pub fn now_local() -> Self {
        let now = Local::now();
        Timestamp {
            year: now.year(),
            month: now.month() as u8,
            day: now.day() as u8,
            day_of_week: now.weekday().num_days_from_sunday() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
            utc_offset_minutes: now.offset().local_minus_utc() / 60,
        }
    }

    /// Render as a PDF date string, e.g. `D:20250301120000+02'00'`.
    pub fn to_pdf_date(&self) -> String {
        let sign = if self.utc_offset_minutes < 0 { '-' } else { '+' };
        let offset = self.utc_offset_minutes.unsigned_abs();
        format!(
            "D:{:04}{:02}{:02}{:02}{:02}{:02}{}{:02}'{:02}'",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            offset / 60,
            offset % 60,
        )
    }
}

/// Source of the metadata timestamp. The exporter takes any `Clock` so tests
/// can pin the embedded dates instead of depending on wall-clock state.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// The process-local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now_local()
    }
}

/// Document-level descriptive fields, serialized as the Info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl DocumentInfo {
    /// Exported documents are never edited after creation, so the
    /// modification time always equals the creation time.
    pub fn new(title: impl Into<String>, creator: impl Into<String>, created: Timestamp) -> Self {
        DocumentInfo {
            title: title.into(),
            creator: creator.into(),
            created,
            modified: created,
        }
    }

    pub(crate) fn to_dict(&self) -> Dict {
        Dict::new()
            .entry("Title", Object::text(self.title.as_str()))
            .entry("Creator", Object::text(self.creator.as_str()))
            .entry("CreationDate", Object::text(self.created.to_pdf_date()))
            .entry("ModDate", Object::text(self.modified.to_pdf_date()))
    }
}
