mod calculator;
mod error;
mod types;

pub use calculator::calculate_plan;
pub use error::PlanError;
pub use types::{CareTask, Crop, CropCatalog, PlanTask};
