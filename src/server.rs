use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use std::path::PathBuf;

use crate::handlers;
use crate::storage::db;

/// Shared per-worker state. Handlers open short-lived connections against
/// `db_path`; the SQLite unique index carries the concurrency guarantees.
pub struct AppState {
    pub db_path: PathBuf,
}

pub async fn run_server(bind_addr: &str, db_path: PathBuf) -> std::io::Result<()> {
    // Fail fast if the database cannot be opened or migrated.
    db::open_at(&db_path)
        .map_err(|e| std::io::Error::other(format!("failed to open database: {}", e)))?;

    let state = web::Data::new(AppState { db_path });
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(Cors::permissive())
            .route("/bookings", web::get().to(handlers::bookings::list_bookings))
            .route("/bookings", web::post().to(handlers::bookings::create_bookings_handler))
            .route("/bookings/grouped", web::get().to(handlers::bookings::grouped_bookings))
            .route("/bookings/{id}", web::delete().to(handlers::bookings::delete_booking_handler))
            .route("/batches/{year}/{month}", web::get().to(handlers::batches::month_batches_handler))
            .route("/help", web::get().to(handlers::help::help_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
