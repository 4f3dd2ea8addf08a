//! Reservation time slots and the half-open overlap test.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("Slot end {end} must be after start {start}")]
    EmptySlot { start: String, end: String },
}

/// Parse an `HH:MM` wall-clock time into minutes since midnight.
pub fn parse_time(time: &str) -> Result<u32, SlotError> {
    let invalid = || SlotError::InvalidTime(time.to_string());

    let (hours, minutes) = time.trim().split_once(':').ok_or_else(invalid)?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if hours.len() != 2 || minutes.len() != 2 || !digits(hours) || !digits(minutes) {
        return Err(invalid());
    }
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if hours >= 24 || minutes >= 60 {
        return Err(invalid());
    }

    Ok(hours * 60 + minutes)
}

/// A same-day `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    start: u32,
    end: u32,
}

impl Slot {
    pub fn parse(start: &str, end: &str) -> Result<Self, SlotError> {
        let slot = Self { start: parse_time(start)?, end: parse_time(end)? };
        if slot.end <= slot.start {
            return Err(SlotError::EmptySlot { start: start.to_string(), end: end.to_string() });
        }
        Ok(slot)
    }

    /// Start time in canonical `HH:MM` form.
    pub fn start_label(&self) -> String {
        format_minutes(self.start)
    }

    pub fn end_label(&self) -> String {
        format_minutes(self.end)
    }

    /// Half-open overlap: touching edges do not overlap.
    pub fn overlaps(&self, other: &Slot) -> bool {
        is_overlap(self.start, self.end, other.start, other.end)
    }
}

fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start_label(), self.end_label())
    }
}

/// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
pub fn is_overlap(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
    s1 < e2 && s2 < e1
}
