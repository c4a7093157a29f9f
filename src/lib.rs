// Root library of the `classbook` crate: batch schedule engine, booking
// storage and the HTTP API on top of them.

pub mod handlers;
pub mod models;
pub mod schedule;
pub mod server;
pub mod storage;

/// Run the HTTP server (re-export for `main`).
pub use server::run_server;
