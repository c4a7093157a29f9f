// Gap dates: days inside the batch span that are neither class days nor the
// weekly off-day.

use chrono::Datelike;
use std::collections::HashSet;

use crate::models::Batch;
use crate::schedule::{ScheduleConfig, ScheduleError, format_date_str, generate_batches};

/// Gap dates for `(year, month)` as chronological `YYYY-MM-DD` strings.
pub fn gap_dates(cfg: &ScheduleConfig, year: i32, month: u32) -> Result<Vec<String>, ScheduleError> {
    let batches = generate_batches(cfg, year, month)?;
    gap_dates_for(cfg, &batches)
}

/// Same as [`gap_dates`], but over an already generated schedule. The span is
/// the closed range from the first class day of the first batch to the last
/// class day of the last batch.
pub fn gap_dates_for(cfg: &ScheduleConfig, batches: &[Batch]) -> Result<Vec<String>, ScheduleError> {
    let class_dates: HashSet<&str> = batches
        .iter()
        .flat_map(|b| b.days.iter().map(|d| d.date_str.as_str()))
        .collect();

    let (Some(first), Some(last)) = (
        batches.first().and_then(|b| b.days.first()),
        batches.last().and_then(|b| b.days.last()),
    ) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    let mut cursor = first.date;
    while cursor <= last.date {
        let date_str = format_date_str(cursor);
        if cursor.weekday() != cfg.off_day && !class_dates.contains(date_str.as_str()) {
            out.push(date_str);
        }
        cursor = cursor.succ_opt().ok_or(ScheduleError::DateRange {
            year: first.year,
            month: first.month,
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};

    #[test]
    fn january_2024_has_four_gap_dates() {
        let cfg = ScheduleConfig::default();
        let gaps = gap_dates(&cfg, 2024, 0).unwrap();
        assert_eq!(gaps, vec!["2024-01-09", "2024-01-10", "2024-01-19", "2024-01-20"]);
    }

    #[test]
    fn class_off_and_gap_days_partition_the_span() {
        let cfg = ScheduleConfig::default();
        for (year, month) in [(2024, 0), (2024, 8), (2025, 1), (2026, 11)] {
            let batches = generate_batches(&cfg, year, month).unwrap();
            let gaps: HashSet<String> = gap_dates_for(&cfg, &batches).unwrap().into_iter().collect();
            let class_dates: HashSet<String> = batches
                .iter()
                .flat_map(|b| b.days.iter().map(|d| d.date_str.clone()))
                .collect();

            let first = batches[0].days[0].date;
            let last = batches[2].days[6].date;
            let mut cursor = first;
            while cursor <= last {
                let ds = format_date_str(cursor);
                let mut hits = 0;
                if class_dates.contains(&ds) {
                    hits += 1;
                }
                if cursor.weekday() == cfg.off_day {
                    hits += 1;
                }
                if gaps.contains(&ds) {
                    hits += 1;
                }
                assert_eq!(hits, 1, "{} in {}-{} is in {} sets", ds, year, month, hits);
                cursor = cursor.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn gaps_are_chronological_and_unique() {
        let cfg = ScheduleConfig::default();
        let gaps = gap_dates(&cfg, 2025, 6).unwrap();
        for pair in gaps.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        let unique: HashSet<&String> = gaps.iter().collect();
        assert_eq!(unique.len(), gaps.len());
    }

    #[test]
    fn gap_dates_never_fall_on_the_off_day() {
        let cfg = ScheduleConfig::default();
        for month in 0..12 {
            for ds in gap_dates(&cfg, 2024, month).unwrap() {
                let date = NaiveDate::parse_from_str(&ds, "%Y-%m-%d").unwrap();
                assert_ne!(date.weekday(), Weekday::Sun);
            }
        }
    }

    #[test]
    fn empty_schedule_has_no_gaps() {
        let cfg = ScheduleConfig::default();
        assert!(gap_dates_for(&cfg, &[]).unwrap().is_empty());
    }
}
