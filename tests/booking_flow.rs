// End-to-end flow over the engine plus the SQLite store: book, project,
// delete, re-select.

use rusqlite::Connection;
use std::collections::HashSet;

use classbook::models::SlotRequest;
use classbook::schedule::{
    MONTHLY_CAPACITY, ScheduleConfig, SelectionError, SlotPick, Toggle, gap_dates_for,
    generate_batches, project, toggle_selection,
};
use classbook::storage::bookings::{
    bookings_for_month, create_bookings, delete_booking, insert_booking,
};
use classbook::storage::db::init_schema;

fn mem_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn slot_from_day(day: &classbook::models::ClassDay) -> SlotRequest {
    SlotRequest {
        date: day.date_str.clone(),
        batch_number: day.batch_number,
        day_index: day.day_index,
        topic: day.topic.clone(),
        month: day.month,
        year: day.year,
    }
}

#[test]
fn booked_dates_show_up_in_the_projection_and_clear_after_deletion() {
    let cfg = ScheduleConfig::default();
    let batches = generate_batches(&cfg, 2024, 0).unwrap();
    let conn = mem_conn();

    let day = &batches[0].days[2];
    let booking = insert_booking(&conn, "alice", &slot_from_day(day)).unwrap();

    let booked: HashSet<String> = bookings_for_month(&conn, "alice", 2024, 0)
        .unwrap()
        .iter()
        .map(|b| b.date_str.clone())
        .collect();
    let views = project(&batches, &booked, &HashSet::new());
    assert!(views.iter().any(|v| v.date == day.date_str && v.extended.is_booked));

    delete_booking(&conn, booking.id).unwrap();
    let booked: HashSet<String> = bookings_for_month(&conn, "alice", 2024, 0)
        .unwrap()
        .iter()
        .map(|b| b.date_str.clone())
        .collect();
    let views = project(&batches, &booked, &HashSet::new());
    assert!(views.iter().all(|v| !v.extended.is_booked));
}

#[test]
fn bulk_booking_keeps_going_past_a_duplicate() {
    let cfg = ScheduleConfig::default();
    let batches = generate_batches(&cfg, 2024, 0).unwrap();
    let conn = mem_conn();

    // Pre-book the second day, then submit days 1-3 in bulk.
    insert_booking(&conn, "alice", &slot_from_day(&batches[0].days[1])).unwrap();
    let slots: Vec<SlotRequest> = batches[0].days[..3].iter().map(slot_from_day).collect();
    let outcome = create_bookings(&conn, "alice", &slots).unwrap();

    assert_eq!(outcome.created.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].date, batches[0].days[1].date_str);
}

#[test]
fn persisted_bookings_count_against_the_selection_capacity() {
    let cfg = ScheduleConfig::default();
    let batches = generate_batches(&cfg, 2024, 0).unwrap();
    let gaps = gap_dates_for(&cfg, &batches).unwrap();
    let conn = mem_conn();

    // Persist 5 January bookings, hold 2 pending selections.
    for day in &batches[0].days[..5] {
        insert_booking(&conn, "alice", &slot_from_day(day)).unwrap();
    }
    let booked: Vec<SlotPick> = bookings_for_month(&conn, "alice", 2024, 0)
        .unwrap()
        .iter()
        .map(SlotPick::from)
        .collect();
    assert_eq!(booked.len(), 5);
    let mut selected: Vec<SlotPick> = batches[0].days[5..7].iter().map(SlotPick::from).collect();

    // 5 + 2 = 7: the next January pick must fail with the capacity signal.
    let err = toggle_selection(&cfg, &batches, &gaps, &booked, &mut selected, batches[1].days[0].date);
    assert_eq!(
        err.unwrap_err(),
        SelectionError::CapacityExceeded { year: 2024, month: 0 }
    );
    assert_eq!(booked.len() + selected.len(), MONTHLY_CAPACITY);

    // The cap applies per month; February is unaffected.
    let feb = generate_batches(&cfg, 2024, 1).unwrap();
    let feb_gaps = gap_dates_for(&cfg, &feb).unwrap();
    let res = toggle_selection(&cfg, &feb, &feb_gaps, &booked, &mut selected, feb[0].days[0].date);
    assert_eq!(res.unwrap(), Toggle::Added);
}
