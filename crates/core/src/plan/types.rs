use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PlanError;

/// A single step in a crop's care schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTask {
    #[serde(rename = "task_title")]
    pub title: String,
    /// Days after planting when the task is due. `None` marks an ongoing
    /// task (e.g. "water regularly") with no fixed date.
    #[serde(
        rename = "days_after_planting",
        default,
        deserialize_with = "crate::serde::deserialize_optional_days"
    )]
    pub days_after_planting: Option<i64>,
}

impl CareTask {
    /// Creates a dated care task.
    pub fn dated(title: impl Into<String>, days_after_planting: i64) -> Self {
        Self {
            title: title.into(),
            days_after_planting: Some(days_after_planting),
        }
    }

    /// Creates an ongoing care task with no fixed date.
    pub fn ongoing(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            days_after_planting: None,
        }
    }
}

/// A crop and its care schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub name: String,
    #[serde(rename = "care_schedule", default)]
    pub care_schedule: Vec<CareTask>,
}

impl Crop {
    /// Creates a crop with an empty care schedule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            care_schedule: Vec::new(),
        }
    }

    /// Appends a task to the care schedule.
    pub fn with_task(mut self, task: CareTask) -> Self {
        self.care_schedule.push(task);
        self
    }

    /// Titles of schedule entries without a day offset. These are care
    /// instructions that apply for the whole lifetime of the planting.
    pub fn ongoing_tasks(&self) -> Vec<&str> {
        self.care_schedule
            .iter()
            .filter(|t| t.days_after_planting.is_none())
            .map(|t| t.title.as_str())
            .collect()
    }
}

/// Reference catalog of crops and their care schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCatalog {
    #[serde(rename = "plants", default)]
    pub crops: Vec<Crop>,
}

impl CropCatalog {
    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        serde_json::from_str(json).map_err(|e| PlanError::InvalidCatalog(e.to_string()))
    }

    /// Looks up a crop by name, case-insensitively.
    pub fn find_crop(&self, name: &str) -> Option<&Crop> {
        let wanted = name.to_lowercase();
        self.crops.iter().find(|c| c.name.to_lowercase() == wanted)
    }

    /// All crop names in catalog order.
    pub fn crop_names(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.name.as_str()).collect()
    }
}

/// A dated task in a computed care plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTask {
    pub task: String,
    pub due_date: NaiveDate,
}

impl PlanTask {
    pub fn new(task: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            task: task.into(),
            due_date,
        }
    }
}
