use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use terratrack_core::plan::PlanTask;
use terratrack_core::serde::{deserialize_optional_date, deserialize_optional_string};
use terratrack_core::tracker::Planting;

/// Request payload for creating a new planting.
///
/// Uses custom deserializers for form handling (empty strings → None).
#[derive(Debug, Deserialize)]
pub struct CreatePlanting {
    pub crop_name: String,
    pub planting_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub batch_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl CreatePlanting {
    /// Converts the create request into a Planting owned by the given user.
    ///
    /// The care plan is supplied by the caller, which computes it from the
    /// crop catalog before constructing the record.
    pub fn into_planting(self, user_id: Uuid, plan: Vec<PlanTask>) -> Planting {
        let mut planting =
            Planting::new(user_id, self.crop_name, self.planting_date).with_plan(plan);

        if let Some(batch_id) = self.batch_id {
            planting = planting.with_batch_id(batch_id);
        }
        if let Some(notes) = self.notes {
            planting = planting.with_notes(notes);
        }

        planting
    }
}

/// Request payload for updating a planting.
///
/// All fields are optional; absent fields leave the stored value unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanting {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub crop_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub planting_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub batch_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub notes: Option<String>,
}

impl UpdatePlanting {
    /// Applies the update to an existing planting.
    ///
    /// Returns `true` if the crop or planting date changed, meaning the
    /// care plan must be recomputed. The image URL is never touched here.
    pub fn apply_to(self, planting: &mut Planting) -> bool {
        planting.updated_at = Utc::now();

        let mut plan_stale = false;

        if let Some(crop_name) = self.crop_name {
            if crop_name != planting.crop_name {
                planting.crop_name = crop_name;
                plan_stale = true;
            }
        }
        if let Some(planting_date) = self.planting_date {
            if planting_date != planting.planting_date {
                planting.planting_date = planting_date;
                plan_stale = true;
            }
        }
        if let Some(batch_id) = self.batch_id {
            planting.batch_id = batch_id;
        }
        if let Some(notes) = self.notes {
            planting.notes = Some(notes);
        }

        plan_stale
    }
}

/// Query parameters for previewing a care plan without saving a planting.
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub planting_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use terratrack_core::plan::PlanTask;

    fn sample_planting() -> Planting {
        Planting::new(
            Uuid::new_v4(),
            "Tomatoes",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_into_planting_applies_optional_fields() {
        let create = CreatePlanting {
            crop_name: "Cucumbers".to_string(),
            planting_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            batch_id: Some("greenhouse-2".to_string()),
            notes: Some("Row 4".to_string()),
        };

        let user_id = Uuid::new_v4();
        let plan = vec![PlanTask::new(
            "Water seedlings",
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        )];
        let planting = create.into_planting(user_id, plan);

        assert_eq!(planting.user_id, user_id);
        assert_eq!(planting.crop_name, "Cucumbers");
        assert_eq!(planting.batch_id, "greenhouse-2");
        assert_eq!(planting.notes, Some("Row 4".to_string()));
        assert_eq!(planting.plan.len(), 1);
    }

    #[test]
    fn test_into_planting_defaults_batch_id() {
        let create = CreatePlanting {
            crop_name: "Lettuce".to_string(),
            planting_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            batch_id: None,
            notes: None,
        };

        let planting = create.into_planting(Uuid::new_v4(), Vec::new());
        assert!(planting.batch_id.starts_with("batch-"));
    }

    #[test]
    fn test_apply_to_crop_change_marks_plan_stale() {
        let mut planting = sample_planting();
        let update = UpdatePlanting {
            crop_name: Some("Lettuce".to_string()),
            planting_date: None,
            batch_id: None,
            notes: None,
        };

        assert!(update.apply_to(&mut planting));
        assert_eq!(planting.crop_name, "Lettuce");
    }

    #[test]
    fn test_apply_to_same_crop_keeps_plan() {
        let mut planting = sample_planting();
        let update = UpdatePlanting {
            crop_name: Some("Tomatoes".to_string()),
            planting_date: None,
            batch_id: None,
            notes: Some("Mulched".to_string()),
        };

        assert!(!update.apply_to(&mut planting));
        assert_eq!(planting.notes, Some("Mulched".to_string()));
    }

    #[test]
    fn test_apply_to_date_change_marks_plan_stale() {
        let mut planting = sample_planting();
        let update = UpdatePlanting {
            crop_name: None,
            planting_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            batch_id: None,
            notes: None,
        };

        assert!(update.apply_to(&mut planting));
        assert_eq!(
            planting.planting_date,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }
}
