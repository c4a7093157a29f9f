// Booking queries. Duplicate slots are a distinct condition (SlotTaken) so
// bulk requests can report per-date outcomes instead of aborting.

use chrono::Utc;
use rusqlite::{Connection, Row, params};
use std::fmt;

use crate::models::{Booking, MonthGroup, SlotError, SlotRequest};

#[derive(Debug)]
pub enum StorageError {
    /// Unique-constraint hit: the user already holds a booking on this date.
    SlotTaken { date_str: String },
    Db(rusqlite::Error),
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::SlotTaken { date_str } => write!(f, "slot already booked: {}", date_str),
            StorageError::Db(e) => write!(f, "database error: {}", e),
            StorageError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Outcome of a bulk booking request: created rows plus per-date conflicts.
#[derive(Debug)]
pub struct BulkOutcome {
    pub created: Vec<Booking>,
    pub errors: Vec<SlotError>,
}

fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date_str: row.get(2)?,
        batch_number: row.get(3)?,
        day_index: row.get(4)?,
        topic: row.get(5)?,
        month: row.get(6)?,
        year: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const BOOKING_COLS: &str =
    "id, user_id, date_str, batch_number, day_index, topic, month, year, created_at";

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _) if f.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Insert one booking. A duplicate `(user_id, date)` maps to `SlotTaken`.
pub fn insert_booking(
    conn: &Connection,
    user_id: &str,
    slot: &SlotRequest,
) -> Result<Booking, StorageError> {
    let created_at = Utc::now().to_rfc3339();
    let res = conn.execute(
        "INSERT INTO bookings (user_id, date_str, batch_number, day_index, topic, month, year, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            slot.date,
            slot.batch_number,
            slot.day_index,
            slot.topic,
            slot.month,
            slot.year,
            created_at
        ],
    );
    match res {
        Ok(_) => Ok(Booking {
            id: conn.last_insert_rowid(),
            user_id: user_id.to_string(),
            date_str: slot.date.clone(),
            batch_number: slot.batch_number,
            day_index: slot.day_index,
            topic: slot.topic.clone(),
            month: slot.month,
            year: slot.year,
            created_at,
        }),
        Err(e) if is_unique_violation(&e) => {
            Err(StorageError::SlotTaken { date_str: slot.date.clone() })
        }
        Err(e) => Err(StorageError::Db(e)),
    }
}

/// Bulk insert: each slot is tried independently; duplicates are accumulated
/// in the outcome rather than aborting the remaining slots.
pub fn create_bookings(
    conn: &Connection,
    user_id: &str,
    slots: &[SlotRequest],
) -> Result<BulkOutcome, StorageError> {
    let mut created = Vec::new();
    let mut errors = Vec::new();
    for slot in slots {
        match insert_booking(conn, user_id, slot) {
            Ok(b) => created.push(b),
            Err(StorageError::SlotTaken { date_str }) => errors.push(SlotError {
                date: date_str,
                message: "Slot already booked".to_string(),
            }),
            Err(e) => return Err(e),
        }
    }
    Ok(BulkOutcome { created, errors })
}

/// All bookings of one user, date-ascending.
pub fn bookings_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Booking>, StorageError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM bookings WHERE user_id = ?1 ORDER BY date_str",
            BOOKING_COLS
        ))
        .map_err(StorageError::Db)?;
    let rows = stmt
        .query_map(params![user_id], row_to_booking)
        .map_err(StorageError::Db)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(StorageError::Db)?);
    }
    Ok(out)
}

/// Bookings of one user for one `(year, month)`, month 0-based.
pub fn bookings_for_month(
    conn: &Connection,
    user_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<Booking>, StorageError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM bookings WHERE user_id = ?1 AND year = ?2 AND month = ?3 ORDER BY date_str",
            BOOKING_COLS
        ))
        .map_err(StorageError::Db)?;
    let rows = stmt
        .query_map(params![user_id, year, month], row_to_booking)
        .map_err(StorageError::Db)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(StorageError::Db)?);
    }
    Ok(out)
}

/// Bookings of one user grouped by `(year, month)`, groups sorted by year
/// then month, bookings date-ascending inside each group.
pub fn grouped_by_month(conn: &Connection, user_id: &str) -> Result<Vec<MonthGroup>, StorageError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM bookings WHERE user_id = ?1 ORDER BY year, month, date_str",
            BOOKING_COLS
        ))
        .map_err(StorageError::Db)?;
    let rows = stmt
        .query_map(params![user_id], row_to_booking)
        .map_err(StorageError::Db)?;

    let mut groups: Vec<MonthGroup> = Vec::new();
    for r in rows {
        let b = r.map_err(StorageError::Db)?;
        match groups.last_mut() {
            Some(g) if g.year == b.year && g.month == b.month => g.bookings.push(b),
            _ => groups.push(MonthGroup { year: b.year, month: b.month, bookings: vec![b] }),
        }
    }
    Ok(groups)
}

pub fn find_booking(conn: &Connection, id: i64) -> Result<Option<Booking>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("SELECT {} FROM bookings WHERE id = ?1", BOOKING_COLS))
        .map_err(StorageError::Db)?;
    let mut rows = stmt.query(params![id]).map_err(StorageError::Db)?;
    match rows.next().map_err(StorageError::Db)? {
        Some(row) => Ok(Some(row_to_booking(row).map_err(StorageError::Db)?)),
        None => Ok(None),
    }
}

pub fn delete_booking(conn: &Connection, id: i64) -> Result<(), StorageError> {
    conn.execute("DELETE FROM bookings WHERE id = ?1", params![id])
        .map_err(StorageError::Db)?;
    Ok(())
}
