//! Conversion of loosely-typed table rows into validated activities.
//!
//! Rows come from an editable table or a CSV file with the columns
//! `Activity`, `Duration (Days)` and `Dependencies`. Every cell may be missing
//! or hold arbitrary text; this module is the only place that interprets it.

use rustc_hash::FxHashSet;

use crate::error::CpmError;
use crate::models::{Activity, ActivityRow};

pub const COLUMN_ACTIVITY: &str = "Activity";
pub const COLUMN_DURATION: &str = "Duration (Days)";
pub const COLUMN_DEPENDENCIES: &str = "Dependencies";

/// Interchange columns, in their canonical order.
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_ACTIVITY, COLUMN_DURATION, COLUMN_DEPENDENCIES];

/// Check that a header contains every required column (in any order).
pub fn check_columns<S: AsRef<str>>(columns: &[S]) -> Result<(), CpmError> {
    let present: FxHashSet<&str> = columns.iter().map(|c| c.as_ref().trim()).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&required| !present.contains(required))
        .map(|&required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CpmError::MissingColumns { columns: missing })
    }
}

/// Split a dependency cell such as `"D, E"` into ids.
///
/// Tokens are trimmed, empty tokens dropped and repeats collapsed, keeping the
/// first occurrence order.
pub fn parse_dependencies(cell: &str) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    cell.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Parse a duration cell as a non-negative number of days.
fn parse_duration(activity: &str, cell: Option<&str>) -> Result<f64, CpmError> {
    let text = cell.map(str::trim).unwrap_or_default();
    let invalid = || CpmError::InvalidDuration {
        activity: activity.to_string(),
        value: text.to_string(),
    };

    let value: f64 = text.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, |c| c.trim().is_empty())
}

/// Convert table rows into activities.
///
/// Rows whose every cell is blank are skipped (an editable table's trailing
/// empty line). A row with data but no activity id is rejected, as is a row
/// whose duration is missing or not a non-negative number.
///
/// # Returns
/// * Activities in row order; graph-level checks are left to `cpm::compute`
pub fn parse_rows(rows: &[ActivityRow]) -> Result<Vec<Activity>, CpmError> {
    let mut activities = Vec::with_capacity(rows.len());

    for (position, row) in rows.iter().enumerate() {
        let id_cell = row.activity.as_deref();
        let duration_cell = row.duration.as_deref();
        let deps_cell = row.dependencies.as_deref();

        if is_blank(id_cell) {
            if is_blank(duration_cell) && is_blank(deps_cell) {
                continue;
            }
            return Err(CpmError::MissingActivityId { row: position + 1 });
        }

        let id = id_cell.map(str::trim).unwrap_or_default().to_string();
        let duration_days = parse_duration(&id, duration_cell)?;
        let dependencies = deps_cell.map(parse_dependencies).unwrap_or_default();

        activities.push(Activity {
            id,
            duration_days,
            dependencies,
        });
    }

    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(parse_dependencies("D, E"), vec!["D", "E"]);
        assert_eq!(parse_dependencies("D,E"), vec!["D", "E"]);
        assert_eq!(parse_dependencies(" A ,, B , A "), vec!["A", "B"]);
        assert!(parse_dependencies("").is_empty());
        assert!(parse_dependencies("  ,  ").is_empty());
    }

    #[test]
    fn test_parse_rows_sample() {
        let rows = vec![
            ActivityRow::new("A", "5", ""),
            ActivityRow::new(" B ", "7", "A"),
            ActivityRow::new("F", "5.5", "D, E"),
        ];
        let activities = parse_rows(&rows).unwrap();

        assert_eq!(activities.len(), 3);
        assert_eq!(activities[0], Activity::new("A", 5.0));
        assert_eq!(activities[1].id, "B");
        assert_eq!(activities[1].dependencies, vec!["A"]);
        assert!((activities[2].duration_days - 5.5).abs() < 1e-9);
        assert_eq!(activities[2].dependencies, vec!["D", "E"]);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = vec![
            ActivityRow::new("A", "1", ""),
            ActivityRow::default(),
            ActivityRow::new("  ", " ", ""),
        ];
        let activities = parse_rows(&rows).unwrap();
        assert_eq!(activities.len(), 1);
    }

    #[test]
    fn test_row_without_id_rejected() {
        let rows = vec![ActivityRow::new("A", "1", ""), ActivityRow::new("", "3", "A")];
        assert_eq!(
            parse_rows(&rows).unwrap_err(),
            CpmError::MissingActivityId { row: 2 }
        );
    }

    #[test]
    fn test_non_numeric_duration_rejected() {
        let rows = vec![ActivityRow::new("A", "five", "")];
        assert_eq!(
            parse_rows(&rows).unwrap_err(),
            CpmError::InvalidDuration {
                activity: "A".to_string(),
                value: "five".to_string(),
            }
        );
    }

    #[test]
    fn test_negative_and_missing_duration_rejected() {
        let negative = vec![ActivityRow::new("A", "-2", "")];
        assert!(matches!(
            parse_rows(&negative),
            Err(CpmError::InvalidDuration { .. })
        ));

        let missing = vec![ActivityRow {
            activity: Some("A".to_string()),
            duration: None,
            dependencies: None,
        }];
        assert!(matches!(
            parse_rows(&missing),
            Err(CpmError::InvalidDuration { activity, value }) if activity == "A" && value.is_empty()
        ));
    }

    #[test]
    fn test_infinite_duration_rejected() {
        let rows = vec![ActivityRow::new("A", "inf", "")];
        assert!(matches!(
            parse_rows(&rows),
            Err(CpmError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_check_columns() {
        assert!(check_columns(&["Activity", "Duration (Days)", "Dependencies"]).is_ok());
        assert!(check_columns(&["Dependencies", "Activity", "Duration (Days)", "Notes"]).is_ok());

        assert_eq!(
            check_columns(&["Activity", "Duration"]).unwrap_err(),
            CpmError::MissingColumns {
                columns: vec!["Duration (Days)".to_string(), "Dependencies".to_string()],
            }
        );
    }
}
