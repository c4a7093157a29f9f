// Slot-selection policy: which dates a user may toggle into their working
// selection, and the per-month capacity rule.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::models::{Batch, Booking, ClassDay};
use crate::schedule::{ScheduleConfig, find_class_day, format_date_str};

/// Maximum bookings plus pending selections per user per `(year, month)`.
pub const MONTHLY_CAPACITY: usize = 7;

/// A slot a user holds, either persisted (mapped from a booking) or pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPick {
    pub date_str: String,
    pub day_index: u32,
    pub topic: String,
    pub batch_number: u32,
    /// 0-based month of the schedule the slot came from.
    pub month: u32,
    pub year: i32,
}

impl From<&ClassDay> for SlotPick {
    fn from(day: &ClassDay) -> Self {
        SlotPick {
            date_str: day.date_str.clone(),
            day_index: day.day_index,
            topic: day.topic.clone(),
            batch_number: day.batch_number,
            month: day.month,
            year: day.year,
        }
    }
}

impl From<&Booking> for SlotPick {
    fn from(b: &Booking) -> Self {
        SlotPick {
            date_str: b.date_str.clone(),
            day_index: b.day_index,
            topic: b.topic.clone(),
            batch_number: b.batch_number,
            month: b.month,
            year: b.year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The clicked date falls on the weekly off-day.
    OffDay,
    /// The clicked date lies between batches.
    GapDate,
    /// The clicked date is not a class day of this schedule.
    NotAClassDay,
    /// The date is already booked for this user; toggling is rejected.
    AlreadyBooked,
    /// Adding would exceed [`MONTHLY_CAPACITY`] for the slot's month.
    CapacityExceeded { year: i32, month: u32 },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::OffDay => write!(f, "date falls on the weekly off-day"),
            SelectionError::GapDate => write!(f, "date is a gap date between batches"),
            SelectionError::NotAClassDay => write!(f, "date is not a class day"),
            SelectionError::AlreadyBooked => write!(f, "slot already booked"),
            SelectionError::CapacityExceeded { year, month } => write!(
                f,
                "at most {} slots per month (month {} of {})",
                MONTHLY_CAPACITY, month, year
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Toggle `date` in the user's pending selection.
///
/// A date already selected is removed. Otherwise it is added, provided it is
/// a selectable class day (not the off-day, not a gap date, not booked) and
/// the user stays within [`MONTHLY_CAPACITY`] for the slot's `(year, month)`,
/// counting persisted bookings plus pending selections in that month.
pub fn toggle_selection(
    cfg: &ScheduleConfig,
    batches: &[Batch],
    gap_dates: &[String],
    booked: &[SlotPick],
    selected: &mut Vec<SlotPick>,
    date: NaiveDate,
) -> Result<Toggle, SelectionError> {
    if date.weekday() == cfg.off_day {
        return Err(SelectionError::OffDay);
    }
    let date_str = format_date_str(date);
    if gap_dates.iter().any(|g| g == &date_str) {
        return Err(SelectionError::GapDate);
    }
    let Some(day) = find_class_day(batches, &date_str) else {
        return Err(SelectionError::NotAClassDay);
    };
    if booked.iter().any(|b| b.date_str == date_str) {
        return Err(SelectionError::AlreadyBooked);
    }

    if let Some(pos) = selected.iter().position(|s| s.date_str == date_str) {
        selected.remove(pos);
        return Ok(Toggle::Removed);
    }

    let in_slot_month = |s: &&SlotPick| s.month == day.month && s.year == day.year;
    let held = booked.iter().filter(in_slot_month).count()
        + selected.iter().filter(in_slot_month).count();
    if held >= MONTHLY_CAPACITY {
        return Err(SelectionError::CapacityExceeded { year: day.year, month: day.month });
    }

    selected.push(SlotPick::from(day));
    Ok(Toggle::Added)
}
