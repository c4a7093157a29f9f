// Batch generation: walk the month day by day, collecting class days and
// skipping the weekly off-day.

use chrono::{Datelike, NaiveDate};

use crate::models::{Batch, ClassDay};
use crate::schedule::{ScheduleConfig, ScheduleError, format_date_str};

/// Generate the batch schedule for `(year, month)`, `month` 0-based.
///
/// The cursor starts at the first of the month. Every day whose weekday is
/// not the off-day becomes the next class day (day_index 1..=7, topic taken
/// from the config's topic list) until the batch is full; between batches the
/// cursor skips exactly `gap_working_days` further non-off-days. Batches may
/// spill past the end of the requested month.
///
/// Always yields exactly `batches_per_month` batches of `days_per_batch`
/// days each for any in-range input.
pub fn generate_batches(
    cfg: &ScheduleConfig,
    year: i32,
    month: u32,
) -> Result<Vec<Batch>, ScheduleError> {
    if month > 11 {
        return Err(ScheduleError::InvalidMonth(month));
    }
    let mut cursor = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .ok_or(ScheduleError::DateRange { year, month })?;

    let mut batches = Vec::with_capacity(cfg.batches_per_month as usize);
    for batch_number in 1..=cfg.batches_per_month {
        let mut days: Vec<ClassDay> = Vec::with_capacity(cfg.days_per_batch());
        while days.len() < cfg.days_per_batch() {
            if cursor.weekday() != cfg.off_day {
                let day_index = days.len() as u32 + 1;
                days.push(ClassDay {
                    id: format!("{}-{}-batch{}-day{}", year, month, batch_number, day_index),
                    date: cursor,
                    date_str: format_date_str(cursor),
                    day_index,
                    topic: cfg.topics[day_index as usize - 1].to_string(),
                    batch_number,
                    month,
                    year,
                });
            }
            cursor = next_day(cursor, year, month)?;
        }

        let start_date = days[0].date_str.clone();
        let end_date = days[days.len() - 1].date_str.clone();
        batches.push(Batch { batch_number, days, start_date, end_date });

        if batch_number < cfg.batches_per_month {
            let mut gap = 0;
            while gap < cfg.gap_working_days {
                if cursor.weekday() != cfg.off_day {
                    gap += 1;
                }
                cursor = next_day(cursor, year, month)?;
            }
        }
    }

    Ok(batches)
}

fn next_day(date: NaiveDate, year: i32, month: u32) -> Result<NaiveDate, ScheduleError> {
    date.succ_opt().ok_or(ScheduleError::DateRange { year, month })
}
