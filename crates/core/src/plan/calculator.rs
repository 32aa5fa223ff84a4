use chrono::{Duration, NaiveDate};

use super::{CropCatalog, PlanError, PlanTask};

/// Computes the dated care plan for a crop planted on a given date.
///
/// The crop is looked up case-insensitively in the catalog. Every schedule
/// entry with a day offset becomes a task due `planting_date + offset`;
/// entries without an offset are ongoing care and are skipped here (see
/// [`Crop::ongoing_tasks`](super::Crop::ongoing_tasks)). The result is
/// sorted by due date, preserving schedule order for equal dates.
///
/// A crop missing from the catalog is an error; a known crop with an empty
/// schedule yields an empty plan.
pub fn calculate_plan(
    crop_name: &str,
    planting_date: NaiveDate,
    catalog: &CropCatalog,
) -> Result<Vec<PlanTask>, PlanError> {
    let crop = catalog
        .find_crop(crop_name)
        .ok_or_else(|| PlanError::UnknownCrop(crop_name.to_string()))?;

    let mut plan: Vec<PlanTask> = crop
        .care_schedule
        .iter()
        .filter_map(|task| {
            task.days_after_planting
                .map(|days| PlanTask::new(task.title.clone(), planting_date + Duration::days(days)))
        })
        .collect();

    plan.sort_by_key(|t| t.due_date);
    Ok(plan)
}
