// Batch schedule engine. Pure functions over (year, month) and fixed
// configuration; nothing here touches storage or the network.

pub mod calendar;
pub mod gaps;
pub mod generator;
pub mod selection;

pub use calendar::project;
pub use gaps::{gap_dates, gap_dates_for};
pub use generator::generate_batches;
pub use selection::{MONTHLY_CAPACITY, SelectionError, SlotPick, Toggle, toggle_selection};

use chrono::{NaiveDate, Weekday};
use std::fmt;

use crate::models::{Batch, ClassDay};

/// Topic taught on each of the seven class days, in batch order.
pub const TOPICS: [&str; 7] = [
    "Topic 1", "Topic 2", "Topic 3", "Topic 4", "Topic 5", "Topic 6", "Topic 7",
];

/// Fixed parameters of the schedule. The defaults are the production values;
/// tests exercise alternates (e.g. a different off-day) without patching
/// module globals.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// One topic per class day; its length is the batch size.
    pub topics: &'static [&'static str],
    /// Weekday never used for classes and never counted in gaps.
    pub off_day: Weekday,
    pub batches_per_month: u32,
    /// Working (non-off) days skipped between consecutive batches.
    pub gap_working_days: u32,
}

impl ScheduleConfig {
    pub fn days_per_batch(&self) -> usize {
        self.topics.len()
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            topics: &TOPICS,
            off_day: Weekday::Sun,
            batches_per_month: 3,
            gap_working_days: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Month outside 0..=11. Caller contract violation, not a generator fault.
    InvalidMonth(u32),
    /// The requested year is outside the range representable by chrono.
    DateRange { year: i32, month: u32 },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidMonth(m) => write!(f, "invalid month index {} (expected 0..=11)", m),
            ScheduleError::DateRange { year, month } => {
                write!(f, "date out of range: year {} month {}", year, month)
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Format a calendar date as zero-padded `YYYY-MM-DD` from its local fields.
pub fn format_date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Per-slot lookup: the class day carrying `date_str`, if the date is a class
/// day of any batch.
pub fn find_class_day<'a>(batches: &'a [Batch], date_str: &str) -> Option<&'a ClassDay> {
    batches
        .iter()
        .flat_map(|b| b.days.iter())
        .find(|d| d.date_str == date_str)
}
