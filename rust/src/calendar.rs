//! Mapping of relative day offsets onto calendar dates.
//!
//! The engine works in day offsets from project start. Tables and timelines
//! usually want dates; this is the one place that converts.

use chrono::{Days, NaiveDate};
use pyo3::prelude::*;

use crate::config::CalendarConfig;
use crate::error::CpmError;
use crate::models::{ScheduleResult, ScheduledActivity};

/// Calendar dates for one scheduled activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct DatedActivity {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub earliest_start: NaiveDate,
    #[pyo3(get)]
    pub earliest_finish: NaiveDate,
    #[pyo3(get)]
    pub latest_start: NaiveDate,
    #[pyo3(get)]
    pub latest_finish: NaiveDate,
    #[pyo3(get)]
    pub slack_days: f64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl DatedActivity {
    fn __repr__(&self) -> String {
        format!(
            "DatedActivity(id={:?}, es={}, ef={}, ls={}, lf={})",
            self.id,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish
        )
    }
}

fn add_days(base: NaiveDate, days: f64) -> Option<NaiveDate> {
    // Offsets are validated non-negative and finite; the cast saturates otherwise
    base.checked_add_days(Days::new(days as u64))
}

/// Date on which work starting at `offset` begins.
fn start_date(calendar: &CalendarConfig, offset: f64) -> Option<NaiveDate> {
    add_days(calendar.start_date, offset.floor())
}

/// Date on which work ending at `offset` is done.
///
/// With `inclusive_end` this is the last day worked, but never earlier than the
/// activity's own start date (zero-duration milestones finish the day they start).
fn finish_date(calendar: &CalendarConfig, offset: f64, start: NaiveDate) -> Option<NaiveDate> {
    let end = add_days(calendar.start_date, offset.ceil())?;
    if !calendar.inclusive_end {
        return Some(end);
    }
    Some(
        end.checked_sub_days(Days::new(1))
            .map_or(start, |last| last.max(start)),
    )
}

fn date_row(calendar: &CalendarConfig, row: &ScheduledActivity) -> Option<DatedActivity> {
    let earliest_start = start_date(calendar, row.earliest_start)?;
    let latest_start = start_date(calendar, row.latest_start)?;
    Some(DatedActivity {
        id: row.id.clone(),
        earliest_start,
        earliest_finish: finish_date(calendar, row.earliest_finish, earliest_start)?,
        latest_start,
        latest_finish: finish_date(calendar, row.latest_finish, latest_start)?,
        slack_days: row.slack,
        is_critical: row.is_critical,
    })
}

/// Calendar dates for every activity of a schedule, in the schedule's row order.
///
/// Start offsets are floored and finish offsets ceiled to whole days.
pub fn schedule_dates(
    result: &ScheduleResult,
    calendar: &CalendarConfig,
) -> Result<Vec<DatedActivity>, CpmError> {
    result
        .activities
        .iter()
        .map(|row| {
            date_row(calendar, row).ok_or_else(|| CpmError::DateOutOfRange {
                activity: row.id.clone(),
            })
        })
        .collect()
}

/// Calendar date on which the whole project is done.
pub fn project_finish_date(
    result: &ScheduleResult,
    calendar: &CalendarConfig,
) -> Result<NaiveDate, CpmError> {
    finish_date(calendar, result.makespan, calendar.start_date)
        .ok_or(CpmError::ProjectFinishOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpm::compute;
    use crate::models::Activity;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_activity(id: &str, duration: f64, deps: &[&str]) -> Activity {
        Activity::new(id, duration).with_dependencies(deps.iter().copied())
    }

    fn sample_result() -> ScheduleResult {
        compute(&[
            make_activity("A", 5.0, &[]),
            make_activity("B", 7.0, &["A"]),
            make_activity("C", 6.0, &["A"]),
            make_activity("D", 4.0, &["B"]),
            make_activity("E", 6.0, &["C"]),
            make_activity("F", 5.0, &["D", "E"]),
            make_activity("G", 4.0, &["F"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_inclusive_end_dates() {
        let calendar = CalendarConfig::new(make_date(2025, 1, 1));
        let dated = schedule_dates(&sample_result(), &calendar).unwrap();

        let a = &dated[0];
        assert_eq!(a.earliest_start, make_date(2025, 1, 1));
        assert_eq!(a.earliest_finish, make_date(2025, 1, 5));

        // B starts the day after A's last day
        let b = &dated[1];
        assert_eq!(b.earliest_start, make_date(2025, 1, 6));
        assert_eq!(b.earliest_finish, make_date(2025, 1, 12));
        assert_eq!(b.latest_start, make_date(2025, 1, 7));
        assert_eq!(b.latest_finish, make_date(2025, 1, 13));
        assert!(!b.is_critical);

        assert_eq!(
            project_finish_date(&sample_result(), &calendar).unwrap(),
            make_date(2025, 1, 26)
        );
    }

    #[test]
    fn test_exclusive_end_dates() {
        let calendar = CalendarConfig {
            start_date: make_date(2025, 1, 1),
            inclusive_end: false,
        };
        let dated = schedule_dates(&sample_result(), &calendar).unwrap();

        assert_eq!(dated[0].earliest_finish, make_date(2025, 1, 6));
        assert_eq!(dated[1].earliest_start, make_date(2025, 1, 6));
    }

    #[test]
    fn test_milestone_finishes_on_its_start_day() {
        let result =
            compute(&[make_activity("A", 3.0, &[]), make_activity("M", 0.0, &["A"])]).unwrap();
        let calendar = CalendarConfig::new(make_date(2025, 6, 30));
        let dated = schedule_dates(&result, &calendar).unwrap();

        let m = &dated[1];
        assert_eq!(m.earliest_start, make_date(2025, 7, 3));
        assert_eq!(m.earliest_finish, make_date(2025, 7, 3));
    }

    #[test]
    fn test_fractional_offsets_round_outward() {
        let result = compute(&[
            make_activity("A", 1.5, &[]),
            make_activity("B", 1.0, &["A"]),
        ])
        .unwrap();
        let calendar = CalendarConfig {
            start_date: make_date(2025, 1, 1),
            inclusive_end: false,
        };
        let dated = schedule_dates(&result, &calendar).unwrap();

        // A ends at 1.5 -> ceiled to day 2; B starts at 1.5 -> floored to day 1
        assert_eq!(dated[0].earliest_finish, make_date(2025, 1, 3));
        assert_eq!(dated[1].earliest_start, make_date(2025, 1, 2));
    }

    #[test]
    fn test_critical_latest_dates_match_earliest_dates() {
        // 0.1 + 0.9 lands just below 1.0 when walked back from the makespan
        let result = compute(&[
            make_activity("A", 0.1, &[]),
            make_activity("B", 0.9, &["A"]),
            make_activity("C", 0.4, &["B"]),
        ])
        .unwrap();
        let calendar = CalendarConfig::new(make_date(2025, 1, 1));
        let dated = schedule_dates(&result, &calendar).unwrap();

        for row in &dated {
            assert!(row.is_critical);
            assert_eq!(row.latest_start, row.earliest_start, "{}", row.id);
            assert_eq!(row.latest_finish, row.earliest_finish, "{}", row.id);
        }
        assert_eq!(dated[2].earliest_start, make_date(2025, 1, 2));
        assert_eq!(dated[2].latest_start, make_date(2025, 1, 2));
    }

    #[test]
    fn test_activity_dates_out_of_range() {
        let calendar = CalendarConfig::new(NaiveDate::MAX);
        let err = schedule_dates(&sample_result(), &calendar).unwrap_err();

        // A starts on day zero but still finishes past the last representable date
        assert_eq!(
            err,
            CpmError::DateOutOfRange {
                activity: "A".to_string()
            }
        );
        assert_eq!(err.activity_ids(), vec!["A"]);
    }

    #[test]
    fn test_project_finish_out_of_range() {
        let calendar = CalendarConfig::new(NaiveDate::MAX);
        let err = project_finish_date(&sample_result(), &calendar).unwrap_err();

        assert_eq!(err, CpmError::ProjectFinishOutOfRange);
        assert!(err.activity_ids().is_empty());
    }
}
