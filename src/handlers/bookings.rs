use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use std::collections::{HashMap, HashSet};

use crate::models::SlotRequest;
use crate::schedule::MONTHLY_CAPACITY;
use crate::server::AppState;
use crate::storage::{StorageError, bookings, db};

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

#[derive(Deserialize)]
pub struct CreateBookingsRequest {
    pub user_id: String,
    pub slots: Vec<SlotRequest>,
}

/// GET /bookings?user_id=...
/// All bookings of the user, date-ascending.
pub async fn list_bookings(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let user_id = query.user_id.trim();
    if user_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "user_id is required"}));
    }
    let conn = match db::open_at(&state.db_path) {
        Ok(c) => c,
        Err(e) => return server_error(e),
    };
    match bookings::bookings_for_user(&conn, user_id) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => server_error(e),
    }
}

/// GET /bookings/grouped?user_id=...
/// Bookings grouped by (year, month), groups sorted by year then month.
pub async fn grouped_bookings(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let user_id = query.user_id.trim();
    if user_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "user_id is required"}));
    }
    let conn = match db::open_at(&state.db_path) {
        Ok(c) => c,
        Err(e) => return server_error(e),
    };
    match bookings::grouped_by_month(&conn, user_id) {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => server_error(e),
    }
}

/// POST /bookings
/// Bulk create. Each slot is treated independently: duplicates come back in
/// `errors` while the rest are created. The whole request is rejected up
/// front if any month would exceed the per-month capacity.
pub async fn create_bookings_handler(
    state: web::Data<AppState>,
    body: web::Json<CreateBookingsRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if req.user_id.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "user_id is required"}));
    }
    if req.slots.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "Please provide slots to book"}));
    }
    for slot in &req.slots {
        if slot.month > 11 {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("invalid month {} for slot {}", slot.month, slot.date)}));
        }
    }

    let conn = match db::open_at(&state.db_path) {
        Ok(c) => c,
        Err(e) => return server_error(e),
    };

    // Capacity is checked per (year, month) against persisted rows plus the
    // genuinely new dates in this request, before anything is inserted.
    let mut by_month: HashMap<(i32, u32), Vec<&SlotRequest>> = HashMap::new();
    for slot in &req.slots {
        by_month.entry((slot.year, slot.month)).or_default().push(slot);
    }
    for ((year, month), group) in &by_month {
        let existing = match bookings::bookings_for_month(&conn, req.user_id.trim(), *year, *month)
        {
            Ok(rows) => rows,
            Err(e) => return server_error(e),
        };
        let existing_dates: HashSet<&str> = existing.iter().map(|b| b.date_str.as_str()).collect();
        let new_dates: HashSet<&str> = group
            .iter()
            .map(|s| s.date.as_str())
            .filter(|d| !existing_dates.contains(d))
            .collect();
        if existing.len() + new_dates.len() > MONTHLY_CAPACITY {
            return HttpResponse::Conflict().json(json!({
                "error": format!(
                    "capacity exceeded: at most {} bookings per month ({} booked, {} requested for month {} of {})",
                    MONTHLY_CAPACITY, existing.len(), new_dates.len(), month, year
                )
            }));
        }
    }

    match bookings::create_bookings(&conn, req.user_id.trim(), &req.slots) {
        Ok(outcome) => {
            let mut resp = json!({
                "message": format!("{} slots booked successfully", outcome.created.len()),
                "bookings": outcome.created,
            });
            if !outcome.errors.is_empty() {
                resp["errors"] = json!(outcome.errors);
            }
            HttpResponse::Created().json(resp)
        }
        Err(e) => server_error(e),
    }
}

/// DELETE /bookings/{id}?user_id=...
pub async fn delete_booking_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let id = path.into_inner();
    let user_id = query.user_id.trim();
    if user_id.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "user_id is required"}));
    }
    let conn = match db::open_at(&state.db_path) {
        Ok(c) => c,
        Err(e) => return server_error(e),
    };
    let booking = match bookings::find_booking(&conn, id) {
        Ok(Some(b)) => b,
        Ok(None) => return HttpResponse::NotFound().json(json!({"error": "Booking not found"})),
        Err(e) => return server_error(e),
    };
    if booking.user_id != user_id {
        return HttpResponse::Forbidden()
            .json(json!({"error": "Not authorized to delete this booking"}));
    }
    match bookings::delete_booking(&conn, id) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "Booking deleted successfully"})),
        Err(e) => server_error(e),
    }
}

pub(crate) fn server_error(e: StorageError) -> HttpResponse {
    log::error!("storage error: {}", e);
    HttpResponse::InternalServerError().json(json!({"error": "Server error"}))
}
