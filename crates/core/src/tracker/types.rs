use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::PlanTask;

/// A recorded planting: one batch of one crop, planted on one date, with its
/// derived care plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planting {
    pub id: Uuid,
    /// The user this planting belongs to.
    pub user_id: Uuid,
    pub crop_name: String,
    pub planting_date: NaiveDate,
    /// Free-form batch label, e.g. "batch-20250401".
    pub batch_id: String,
    pub notes: Option<String>,
    /// Public URL of the planting photo, if one was uploaded.
    pub image_url: Option<String>,
    /// Dated care tasks computed from the crop catalog at save time.
    pub plan: Vec<PlanTask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Planting {
    /// Creates a new planting with a generated id and a dated batch label.
    pub fn new(user_id: Uuid, crop_name: impl Into<String>, planting_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            crop_name: crop_name.into(),
            planting_date,
            batch_id: super::default_batch_id(now.date_naive()),
            notes: None,
            image_url: None,
            plan: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the batch label for this planting.
    pub fn with_batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = batch_id.into();
        self
    }

    /// Sets the notes for this planting.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the care plan for this planting.
    pub fn with_plan(mut self, plan: Vec<PlanTask>) -> Self {
        self.plan = plan;
        self
    }

    /// Sets the image URL for this planting.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Sets a specific ID for this planting (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// The expected harvest date: the latest due date in the plan, if the
    /// plan has any dated tasks.
    pub fn harvest_date(&self) -> Option<NaiveDate> {
        self.plan.iter().map(|t| t.due_date).max()
    }
}

/// Lifecycle stage of a planting relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantingStatus {
    /// Harvest is more than a week away, or the plan has no dated tasks.
    Ongoing,
    /// Harvest falls within the next week (today included).
    Upcoming,
    /// Harvest date has passed.
    Past,
}

/// Plantings grouped by lifecycle stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedPlantings {
    pub ongoing: Vec<Planting>,
    pub upcoming: Vec<Planting>,
    pub past: Vec<Planting>,
}

impl GroupedPlantings {
    pub fn total(&self) -> usize {
        self.ongoing.len() + self.upcoming.len() + self.past.len()
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Identity provider that authenticated this user, e.g. "cognito".
    pub provider: Option<String>,
    /// The provider's stable subject identifier for this user.
    pub provider_subject: Option<String>,
    /// Whether the user wants harvest reminders and other notifications.
    pub notifications_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with notifications enabled.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            provider: None,
            provider_subject: None,
            notifications_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the identity provider for this user.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the provider subject for this user.
    pub fn with_provider_subject(mut self, subject: impl Into<String>) -> Self {
        self.provider_subject = Some(subject.into());
        self
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_planting_builder() {
        let user_id = Uuid::new_v4();
        let planting = Planting::new(user_id, "Cucumbers", date(2025, 4, 1))
            .with_batch_id("batch-a")
            .with_notes("west bed");

        assert_eq!(planting.user_id, user_id);
        assert_eq!(planting.crop_name, "Cucumbers");
        assert_eq!(planting.batch_id, "batch-a");
        assert_eq!(planting.notes, Some("west bed".to_string()));
        assert_eq!(planting.image_url, None);
        assert!(planting.plan.is_empty());
    }

    #[test]
    fn test_default_batch_id_uses_current_date() {
        let planting = Planting::new(Uuid::new_v4(), "Lettuce", date(2025, 4, 1));
        let expected = format!("batch-{}", Utc::now().date_naive().format("%Y%m%d"));
        assert_eq!(planting.batch_id, expected);
    }

    #[test]
    fn test_harvest_date_is_latest_due_date() {
        let planting = Planting::new(Uuid::new_v4(), "Cucumbers", date(2025, 4, 1)).with_plan(vec![
            PlanTask::new("Thin seedlings", date(2025, 4, 11)),
            PlanTask::new("Harvest", date(2025, 5, 26)),
            PlanTask::new("Fertilize", date(2025, 4, 22)),
        ]);

        assert_eq!(planting.harvest_date(), Some(date(2025, 5, 26)));
    }

    #[test]
    fn test_harvest_date_none_for_empty_plan() {
        let planting = Planting::new(Uuid::new_v4(), "Lettuce", date(2025, 4, 1));
        assert_eq!(planting.harvest_date(), None);
    }

    #[test]
    fn test_user_builder() {
        let user = User::new("alice", "alice@example.com")
            .with_provider("cognito")
            .with_provider_subject("sub-123");

        assert_eq!(user.name, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.provider, Some("cognito".to_string()));
        assert_eq!(user.provider_subject, Some("sub-123".to_string()));
        assert!(user.notifications_enabled);
    }
}
