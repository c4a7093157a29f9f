// Core data structures shared by the schedule engine, storage and the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single class day produced by the batch generator. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDay {
    /// Stable id of the form `{year}-{month}-batch{n}-day{k}`.
    pub id: String,
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, built from local calendar fields (never a UTC conversion).
    pub date_str: String,
    /// Position inside the batch, 1..=7.
    pub day_index: u32,
    pub topic: String,
    /// Batch this day belongs to, 1..=3.
    pub batch_number: u32,
    /// 0-based month (0..=11) the schedule was generated for. Days that spill
    /// past the month boundary keep the requested month, not the calendar one.
    pub month: u32,
    pub year: i32,
}

/// Seven consecutive class days (off-days skipped) under one topic sequence.
#[derive(Debug, Clone, Serialize)]
pub struct Batch {
    pub batch_number: u32,
    pub days: Vec<ClassDay>,
    /// `date_str` of the first class day.
    pub start_date: String,
    /// `date_str` of the last class day.
    pub end_date: String,
}

/// A persisted booking row. At most one per `(user_id, date_str)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: String,
    pub date_str: String,
    pub batch_number: u32,
    pub day_index: u32,
    pub topic: String,
    /// 0-based month of the schedule the slot came from.
    pub month: u32,
    pub year: i32,
    pub created_at: String,
}

/// A slot as submitted by a client in a bulk booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub batch_number: u32,
    pub day_index: u32,
    pub topic: String,
    pub month: u32,
    pub year: i32,
}

/// Bookings of one user for one `(year, month)`, for the grouped listing.
#[derive(Debug, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub bookings: Vec<Booking>,
}

/// Per-date failure inside a bulk booking request.
#[derive(Debug, Clone, Serialize)]
pub struct SlotError {
    pub date: String,
    pub message: String,
}

/// Renderable state of one class day, as consumed by the calendar UI.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub id: String,
    /// `"Day {day_index}"`.
    pub title: String,
    /// `YYYY-MM-DD` of the day this view covers.
    pub date: String,
    pub all_day: bool,
    pub extended: DayState,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayState {
    pub day_index: u32,
    pub topic: String,
    pub batch_number: u32,
    pub is_booked: bool,
    pub is_selected: bool,
    pub month: u32,
    pub year: i32,
    pub date_str: String,
}
