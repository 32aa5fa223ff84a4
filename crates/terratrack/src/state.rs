//! Application state with repository-based storage.
//!
//! Defines the shared state passed to all request handlers. Storage, image
//! hosting, and notification delivery are trait objects so the backing
//! services can be swapped via feature flags.

use std::sync::Arc;

use terratrack_auth::{AuthConfig, AuthState, SessionStore};
use terratrack_core::media::ImageStore;
use terratrack_core::notify::Notifier;
use terratrack_core::plan::CropCatalog;
use terratrack_core::storage::{PlantingRepository, UserRepository};

use crate::catalog::load_catalog;
use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler; all fields are cheaply clonable handles.
#[derive(Clone)]
pub struct AppState {
    /// Planting storage.
    pub planting_repo: Arc<dyn PlantingRepository>,
    /// User storage.
    pub user_repo: Arc<dyn UserRepository>,
    /// Planting photo storage.
    pub image_store: Arc<dyn ImageStore>,
    /// Harvest notification delivery.
    pub notifier: Arc<dyn Notifier>,
    /// Crop catalog used for care plan calculation.
    pub catalog: Arc<CropCatalog>,
    /// Authentication state (sessions, identity provider, cookie config).
    pub auth: AuthState,
}

impl AppState {
    fn build(
        planting_repo: Arc<dyn PlantingRepository>,
        user_repo: Arc<dyn UserRepository>,
        image_store: Arc<dyn ImageStore>,
        notifier: Arc<dyn Notifier>,
        catalog: CropCatalog,
        auth: AuthState,
    ) -> Self {
        Self {
            planting_repo,
            user_repo,
            image_store,
            notifier,
            catalog: Arc::new(catalog),
            auth,
        }
    }

    async fn build_auth(users: Arc<dyn UserRepository>) -> Result<AuthState, anyhow::Error> {
        let sessions = Arc::new(SessionStore::new());
        let auth_config = AuthConfig::from_env()?;
        let auth = AuthState::new(sessions, users, auth_config).await?;
        Ok(auth)
    }

    async fn build_image_store(config: &Config) -> Arc<dyn ImageStore> {
        #[cfg(feature = "s3")]
        {
            Arc::new(crate::media::S3ImageStore::from_env(config.media_bucket.clone()).await)
        }
        #[cfg(not(feature = "s3"))]
        {
            Arc::new(crate::media::InMemoryImageStore::new(
                config.media_bucket.clone(),
            ))
        }
    }

    async fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
        #[cfg(feature = "sns")]
        {
            Arc::new(crate::notify::SnsNotifier::from_env(config.sns_topic_arn.clone()).await)
        }
        #[cfg(not(feature = "sns"))]
        {
            let _ = config;
            Arc::new(crate::notify::LogNotifier::new())
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_factory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        ///
        /// All data lives for the duration of the process. Useful for
        /// development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let catalog = load_catalog(config.catalog_path.as_deref())?;
            let image_store = Self::build_image_store(config).await;
            let notifier = Self::build_notifier(config).await;
            let auth = Self::build_auth(repo.clone()).await?;

            Ok(Self::build(
                repo.clone(),
                repo,
                image_store,
                notifier,
                catalog,
                auth,
            ))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb_factory {
    use super::*;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(DynamoDbRepository::from_env(config.table_name.clone()).await?);
            let catalog = load_catalog(config.catalog_path.as_deref())?;
            let image_store = Self::build_image_store(config).await;
            let notifier = Self::build_notifier(config).await;
            let auth = Self::build_auth(repo.clone()).await?;

            Ok(Self::build(
                repo.clone(),
                repo,
                image_store,
                notifier,
                catalog,
                auth,
            ))
        }
    }
}

/// Allows auth extractors to pull their state out of the app state.
impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::media::InMemoryImageStore;
    use crate::notify::LogNotifier;
    use crate::storage::InMemoryRepository;

    impl Default for AppState {
        /// Creates an AppState with in-memory backends for testing.
        ///
        /// No identity provider is configured; tests authenticate by
        /// seeding sessions directly into the session store.
        fn default() -> Self {
            let repo = Arc::new(InMemoryRepository::new());
            let sessions = Arc::new(SessionStore::new());
            let auth_config = AuthConfig::from_env().expect("auth config");
            let auth = AuthState::without_provider(sessions, repo.clone(), auth_config);

            let catalog = load_catalog(None).expect("embedded catalog");

            Self::build(
                repo.clone(),
                repo,
                Arc::new(InMemoryImageStore::new("terratrack-media")),
                Arc::new(LogNotifier::new()),
                catalog,
                auth,
            )
        }
    }
}
