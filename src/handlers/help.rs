use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::schedule::{MONTHLY_CAPACITY, TOPICS};

/// GET /help: endpoint overview plus an example bulk booking payload.
pub async fn help_handler() -> impl Responder {
    let example = json!({
        "user_id": "alice@example.com",
        "slots": [
            {
                "date": "2024-01-01",
                "batch_number": 1,
                "day_index": 1,
                "topic": TOPICS[0],
                "month": 0,
                "year": 2024
            }
        ]
    });

    HttpResponse::Ok().json(json!({
        "description": "Class-slot booking API. Months are 0-based (0 = January). \
            Each month is partitioned into 3 batches of 7 class days; Sundays and \
            the 2 working days between batches are not bookable.",
        "endpoints": {
            "GET /batches/{year}/{month}?user_id=": "batch schedule, day views, gap dates and the user's bookings",
            "GET /bookings?user_id=": "all bookings of the user, date-ascending",
            "GET /bookings/grouped?user_id=": "bookings grouped by (year, month)",
            "POST /bookings": "bulk create; duplicates are reported per date",
            "DELETE /bookings/{id}?user_id=": "delete one booking owned by the user"
        },
        "post_example": example,
        "monthly_capacity": MONTHLY_CAPACITY,
    }))
}
