mod error;
mod operations;
mod types;

pub use error::PlantingError;
pub use operations::{
    classify_plantings, default_batch_id, planting_status, validate_planting, UPCOMING_WINDOW_DAYS,
};
pub use types::{GroupedPlantings, Planting, PlantingStatus, User};
