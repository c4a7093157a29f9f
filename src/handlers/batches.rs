use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;

use crate::schedule::{ScheduleConfig, gap_dates_for, generate_batches, project};
use crate::server::AppState;
use crate::storage::{bookings, db};

#[derive(Deserialize)]
pub struct OptionalUserQuery {
    pub user_id: Option<String>,
}

/// GET /batches/{year}/{month}?user_id=...
/// The full calendar payload for one month: batches, day views with the
/// user's booked state, gap dates, and the user's bookings.
pub async fn month_batches_handler(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    query: web::Query<OptionalUserQuery>,
) -> impl Responder {
    let (year, month) = path.into_inner();
    if !(0..=11).contains(&month) {
        return HttpResponse::BadRequest().json(json!({"error": "Invalid year or month"}));
    }
    let month = month as u32;

    let cfg = ScheduleConfig::default();
    let batches = match generate_batches(&cfg, year, month) {
        Ok(b) => b,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("{}", e)})),
    };
    let gap_dates = match gap_dates_for(&cfg, &batches) {
        Ok(g) => g,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("{}", e)})),
    };

    let user_bookings = match query.user_id.as_deref().map(str::trim) {
        Some(user_id) if !user_id.is_empty() => {
            let conn = match db::open_at(&state.db_path) {
                Ok(c) => c,
                Err(e) => return crate::handlers::bookings::server_error(e),
            };
            match bookings::bookings_for_month(&conn, user_id, year, month) {
                Ok(rows) => rows,
                Err(e) => return crate::handlers::bookings::server_error(e),
            }
        }
        _ => Vec::new(),
    };

    let booked: HashSet<String> = user_bookings.iter().map(|b| b.date_str.clone()).collect();
    let events = project(&batches, &booked, &HashSet::new());

    HttpResponse::Ok().json(json!({
        "year": year,
        "month": month,
        "batches": batches,
        "events": events,
        "gap_dates": gap_dates,
        "user_bookings": user_bookings,
    }))
}
