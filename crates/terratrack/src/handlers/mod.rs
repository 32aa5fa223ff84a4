pub mod crops;
pub mod error;
pub mod health;
pub mod notifications;
pub mod plantings;

pub use error::AppError;
