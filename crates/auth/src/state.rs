//! Application state for auth.

use axum::extract::FromRef;
use std::sync::Arc;
use terratrack_core::auth::{OidcProviderClient, SessionRepository};
use terratrack_core::storage::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;

#[cfg(not(feature = "mock"))]
use crate::providers::CognitoProvider;

#[cfg(feature = "mock")]
use crate::providers::MockProvider;

/// Shared state for auth handlers.
pub struct AuthState {
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub config: AuthConfig,
    #[cfg(not(feature = "mock"))]
    cognito: Option<Arc<CognitoProvider>>,
    #[cfg(feature = "mock")]
    cognito: Option<Arc<MockProvider>>,
}

impl AuthState {
    /// Creates a new AuthState with the required repositories and provider.
    ///
    /// # Errors
    ///
    /// Returns an error if provider initialization fails (e.g., OIDC discovery).
    #[cfg(not(feature = "mock"))]
    pub async fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        let cognito = if let Some(ref cfg) = config.cognito {
            Some(Arc::new(CognitoProvider::new(cfg).await?))
        } else {
            None
        };

        Ok(Self {
            sessions,
            users,
            config,
            cognito,
        })
    }

    /// Creates a new AuthState with a mock provider for development.
    #[cfg(feature = "mock")]
    pub async fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        use url::Url;

        let mock_idp_url =
            Url::parse("http://localhost:3001").map_err(|e| AuthError::Config(e.to_string()))?;

        let cognito = Some(Arc::new(MockProvider::new(
            mock_idp_url,
            config.base_url.join("/auth/callback").unwrap(),
        )));

        Ok(Self {
            sessions,
            users,
            config,
            cognito,
        })
    }

    /// Creates an AuthState with no identity provider configured.
    ///
    /// Login and callback routes return `ProviderNotConfigured`; session
    /// extractors still work. Intended for tests that seed sessions directly.
    pub fn without_provider(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        config: AuthConfig,
    ) -> Self {
        Self {
            sessions,
            users,
            config,
            cognito: None,
        }
    }

    /// Gets the configured identity provider client.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotConfigured` if no provider is enabled.
    pub fn provider(&self) -> Result<&dyn OidcProviderClient, AuthError> {
        self.cognito
            .as_ref()
            .map(|p| p.as_ref() as &dyn OidcProviderClient)
            .ok_or_else(|| AuthError::ProviderNotConfigured("Cognito".to_string()))
    }
}

impl Clone for AuthState {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            users: self.users.clone(),
            config: self.config.clone(),
            cognito: self.cognito.clone(),
        }
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
