//! In-memory repository implementation.
//!
//! Stores plantings and users in HashMaps wrapped in `Arc<RwLock<_>>`.
//! Data is not persisted and is lost when the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use terratrack_core::storage::{
    PlantingRepository, RepositoryError, Result, UserRepository,
};
use terratrack_core::tracker::{Planting, User};

/// In-memory repository for plantings and users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    plantings: Arc<RwLock<HashMap<Uuid, Planting>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlantingRepository for InMemoryRepository {
    async fn get_planting(&self, id: Uuid) -> Result<Option<Planting>> {
        let plantings = self.plantings.read().await;
        Ok(plantings.get(&id).cloned())
    }

    async fn get_plantings_by_user(&self, user_id: Uuid) -> Result<Vec<Planting>> {
        let plantings = self.plantings.read().await;
        let mut results: Vec<Planting> = plantings
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            a.planting_date
                .cmp(&b.planting_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(results)
    }

    async fn create_planting(&self, planting: &Planting) -> Result<()> {
        let mut plantings = self.plantings.write().await;
        if plantings.contains_key(&planting.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Planting",
                id: planting.id.to_string(),
            });
        }
        plantings.insert(planting.id, planting.clone());
        Ok(())
    }

    async fn update_planting(&self, planting: &Planting) -> Result<()> {
        let mut plantings = self.plantings.write().await;
        if !plantings.contains_key(&planting.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Planting",
                id: planting.id.to_string(),
            });
        }
        plantings.insert(planting.id, planting.clone());
        Ok(())
    }

    async fn delete_planting(&self, id: Uuid) -> Result<()> {
        let mut plantings = self.plantings.write().await;
        if plantings.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Planting",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_provider(
        &self,
        provider: &str,
        provider_subject: &str,
    ) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| {
                u.provider.as_deref() == Some(provider)
                    && u.provider_subject.as_deref() == Some(provider_subject)
            })
            .cloned())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "User",
                id: user.id.to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}
