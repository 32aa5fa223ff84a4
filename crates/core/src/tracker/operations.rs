use chrono::NaiveDate;

use super::{GroupedPlantings, Planting, PlantingError, PlantingStatus};

/// Maximum length for a crop name.
const MAX_CROP_NAME_LENGTH: usize = 100;

/// Maximum length for planting notes.
const MAX_NOTES_LENGTH: usize = 2000;

/// How many days ahead a harvest counts as "upcoming".
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Validates a planting's user-supplied fields.
pub fn validate_planting(crop_name: &str, notes: Option<&str>) -> Result<(), PlantingError> {
    if crop_name.trim().is_empty() {
        return Err(PlantingError::EmptyCropName);
    }
    if crop_name.len() > MAX_CROP_NAME_LENGTH {
        return Err(PlantingError::CropNameTooLong {
            max: MAX_CROP_NAME_LENGTH,
        });
    }
    if let Some(notes) = notes {
        if notes.len() > MAX_NOTES_LENGTH {
            return Err(PlantingError::NotesTooLong {
                max: MAX_NOTES_LENGTH,
            });
        }
    }
    Ok(())
}

/// Default batch label for a planting recorded on the given date.
pub fn default_batch_id(recorded_on: NaiveDate) -> String {
    format!("batch-{}", recorded_on.format("%Y%m%d"))
}

/// Determines a planting's lifecycle stage relative to `today`.
///
/// A planting is judged by its harvest date (the latest dated task in its
/// plan): already harvested plantings are `Past`, harvests due within the
/// next [`UPCOMING_WINDOW_DAYS`] are `Upcoming`, and everything else,
/// including plantings with no dated tasks at all, is `Ongoing`.
pub fn planting_status(planting: &Planting, today: NaiveDate) -> PlantingStatus {
    match planting.harvest_date() {
        Some(harvest) if harvest < today => PlantingStatus::Past,
        Some(harvest) if (harvest - today).num_days() <= UPCOMING_WINDOW_DAYS => {
            PlantingStatus::Upcoming
        }
        _ => PlantingStatus::Ongoing,
    }
}

/// Groups plantings by lifecycle stage, preserving input order within
/// each group.
pub fn classify_plantings(plantings: Vec<Planting>, today: NaiveDate) -> GroupedPlantings {
    let mut grouped = GroupedPlantings::default();
    for planting in plantings {
        match planting_status(&planting, today) {
            PlantingStatus::Ongoing => grouped.ongoing.push(planting),
            PlantingStatus::Upcoming => grouped.upcoming.push(planting),
            PlantingStatus::Past => grouped.past.push(planting),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanTask;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planting_harvested_on(harvest: NaiveDate) -> Planting {
        Planting::new(Uuid::new_v4(), "Cucumbers", date(2025, 4, 1)).with_plan(vec![
            PlanTask::new("Thin seedlings", date(2025, 4, 11)),
            PlanTask::new("Harvest", harvest),
        ])
    }

    // ==================== validate_planting ====================

    #[test]
    fn test_validate_accepts_simple_planting() {
        assert!(validate_planting("Cucumbers", Some("west bed")).is_ok());
    }

    #[test]
    fn test_validate_accepts_missing_notes() {
        assert!(validate_planting("Cucumbers", None).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_crop_name() {
        assert_eq!(
            validate_planting("", None),
            Err(PlantingError::EmptyCropName)
        );
    }

    #[test]
    fn test_validate_rejects_whitespace_crop_name() {
        assert_eq!(
            validate_planting("   ", None),
            Err(PlantingError::EmptyCropName)
        );
    }

    #[test]
    fn test_validate_rejects_long_crop_name() {
        let name = "x".repeat(101);
        assert_eq!(
            validate_planting(&name, None),
            Err(PlantingError::CropNameTooLong { max: 100 })
        );
    }

    #[test]
    fn test_validate_rejects_long_notes() {
        let notes = "x".repeat(2001);
        assert_eq!(
            validate_planting("Cucumbers", Some(&notes)),
            Err(PlantingError::NotesTooLong { max: 2000 })
        );
    }

    #[test]
    fn test_validate_accepts_boundary_lengths() {
        let name = "x".repeat(100);
        let notes = "x".repeat(2000);
        assert!(validate_planting(&name, Some(&notes)).is_ok());
    }

    // ==================== default_batch_id ====================

    #[test]
    fn test_default_batch_id_format() {
        assert_eq!(default_batch_id(date(2025, 4, 1)), "batch-20250401");
        assert_eq!(default_batch_id(date(2025, 12, 31)), "batch-20251231");
    }

    // ==================== planting_status ====================

    #[test]
    fn test_status_past_when_harvest_before_today() {
        let planting = planting_harvested_on(date(2025, 5, 26));
        assert_eq!(
            planting_status(&planting, date(2025, 5, 27)),
            PlantingStatus::Past
        );
    }

    #[test]
    fn test_status_upcoming_when_harvest_is_today() {
        let planting = planting_harvested_on(date(2025, 5, 26));
        assert_eq!(
            planting_status(&planting, date(2025, 5, 26)),
            PlantingStatus::Upcoming
        );
    }

    #[test]
    fn test_status_upcoming_at_window_boundary() {
        let planting = planting_harvested_on(date(2025, 5, 26));
        assert_eq!(
            planting_status(&planting, date(2025, 5, 19)),
            PlantingStatus::Upcoming
        );
    }

    #[test]
    fn test_status_ongoing_just_past_window() {
        let planting = planting_harvested_on(date(2025, 5, 26));
        assert_eq!(
            planting_status(&planting, date(2025, 5, 18)),
            PlantingStatus::Ongoing
        );
    }

    #[test]
    fn test_status_ongoing_without_dated_tasks() {
        let planting = Planting::new(Uuid::new_v4(), "Lettuce", date(2025, 4, 1));
        assert_eq!(
            planting_status(&planting, date(2025, 4, 2)),
            PlantingStatus::Ongoing
        );
    }

    // ==================== classify_plantings ====================

    #[test]
    fn test_classify_groups_by_status() {
        let today = date(2025, 5, 20);
        let past = planting_harvested_on(date(2025, 5, 10));
        let upcoming = planting_harvested_on(date(2025, 5, 25));
        let ongoing = planting_harvested_on(date(2025, 7, 1));

        let grouped = classify_plantings(
            vec![past.clone(), upcoming.clone(), ongoing.clone()],
            today,
        );

        assert_eq!(grouped.past, vec![past]);
        assert_eq!(grouped.upcoming, vec![upcoming]);
        assert_eq!(grouped.ongoing, vec![ongoing]);
        assert_eq!(grouped.total(), 3);
    }

    #[test]
    fn test_classify_preserves_order_within_groups() {
        let today = date(2025, 5, 20);
        let first = planting_harvested_on(date(2025, 5, 1));
        let second = planting_harvested_on(date(2025, 5, 2));

        let grouped = classify_plantings(vec![first.clone(), second.clone()], today);

        assert_eq!(grouped.past, vec![first, second]);
    }

    #[test]
    fn test_classify_empty_input() {
        let grouped = classify_plantings(Vec::new(), date(2025, 5, 20));
        assert_eq!(grouped.total(), 0);
    }
}
