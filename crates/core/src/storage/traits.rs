use async_trait::async_trait;
use uuid::Uuid;

use crate::tracker::{Planting, User};

use super::Result;

/// Repository for planting operations.
#[async_trait]
pub trait PlantingRepository: Send + Sync {
    /// Gets a planting by its ID.
    async fn get_planting(&self, id: Uuid) -> Result<Option<Planting>>;

    /// Gets all plantings for a user, ordered by planting date.
    async fn get_plantings_by_user(&self, user_id: Uuid) -> Result<Vec<Planting>>;

    /// Creates a new planting.
    async fn create_planting(&self, planting: &Planting) -> Result<()>;

    /// Updates an existing planting.
    async fn update_planting(&self, planting: &Planting) -> Result<()>;

    /// Deletes a planting by its ID.
    async fn delete_planting(&self, id: Uuid) -> Result<()>;
}

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Gets a user by identity provider and provider subject.
    async fn get_user_by_provider(&self, provider: &str, subject: &str) -> Result<Option<User>>;

    /// Creates a new user.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;
}
