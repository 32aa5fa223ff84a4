mod notification;
mod planting;

pub use notification::NotificationSettings;
pub use planting::{CreatePlanting, PlanQuery, UpdatePlanting};
