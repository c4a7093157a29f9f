// Persistence layer for bookings (SQLite via rusqlite).

pub mod bookings;
pub mod db;

pub use bookings::{BulkOutcome, StorageError};
