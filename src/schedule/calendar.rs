// Projection of a generated schedule plus booking/selection state into
// renderable day views.

use std::collections::HashSet;

use crate::models::{Batch, DayState, DayView};

/// Join the generated batches with a user's booked and selected date sets.
///
/// Booked state matches by date string alone: within one month the date fully
/// determines the batch and day number, so the batch number is not part of
/// the match key.
pub fn project(
    batches: &[Batch],
    booked_dates: &HashSet<String>,
    selected_dates: &HashSet<String>,
) -> Vec<DayView> {
    let mut views = Vec::new();
    for batch in batches {
        for day in &batch.days {
            views.push(DayView {
                id: day.id.clone(),
                title: format!("Day {}", day.day_index),
                date: day.date_str.clone(),
                all_day: true,
                extended: DayState {
                    day_index: day.day_index,
                    topic: day.topic.clone(),
                    batch_number: day.batch_number,
                    is_booked: booked_dates.contains(&day.date_str),
                    is_selected: selected_dates.contains(&day.date_str),
                    month: day.month,
                    year: day.year,
                    date_str: day.date_str.clone(),
                },
            });
        }
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleConfig, generate_batches};

    fn set(dates: &[&str]) -> HashSet<String> {
        dates.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn projects_one_view_per_class_day() {
        let cfg = ScheduleConfig::default();
        let batches = generate_batches(&cfg, 2024, 0).unwrap();
        let views = project(&batches, &HashSet::new(), &HashSet::new());
        assert_eq!(views.len(), 21);
        assert_eq!(views[0].title, "Day 1");
        assert_eq!(views[0].date, "2024-01-01");
        assert!(views[0].all_day);
        assert!(!views[0].extended.is_booked);
        assert!(!views[0].extended.is_selected);
    }

    #[test]
    fn booked_and_selected_flags_follow_the_input_sets() {
        let cfg = ScheduleConfig::default();
        let batches = generate_batches(&cfg, 2024, 0).unwrap();
        let booked = set(&["2024-01-02"]);
        let selected = set(&["2024-01-11"]);
        let views = project(&batches, &booked, &selected);

        let by_date = |d: &str| views.iter().find(|v| v.date == d).unwrap();
        assert!(by_date("2024-01-02").extended.is_booked);
        assert!(!by_date("2024-01-02").extended.is_selected);
        assert!(by_date("2024-01-11").extended.is_selected);
        assert!(!by_date("2024-01-11").extended.is_booked);
    }

    #[test]
    fn removing_a_booked_date_flips_the_flag_on_reprojection() {
        let cfg = ScheduleConfig::default();
        let batches = generate_batches(&cfg, 2024, 0).unwrap();
        let mut booked = set(&["2024-01-05"]);
        let views = project(&batches, &booked, &HashSet::new());
        assert!(views.iter().any(|v| v.date == "2024-01-05" && v.extended.is_booked));

        booked.remove("2024-01-05");
        let views = project(&batches, &booked, &HashSet::new());
        assert!(views.iter().all(|v| !v.extended.is_booked));
    }
}
