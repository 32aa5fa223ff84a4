//! OIDC authentication for terratrack.
//!
//! This crate provides:
//! - The OIDC authorization-code flow against Amazon Cognito
//! - Session storage and Axum extractors for authentication
//! - A mock provider (behind the `mock` feature) for development and tests

mod config;
mod error;
mod extractors;
mod handlers;
mod providers;
mod sessions;
mod state;

pub use config::{AuthConfig, CognitoConfig};
pub use error::AuthError;
pub use extractors::{CurrentUser, OptionalUser};
pub use handlers::auth_routes;
pub use providers::CognitoProvider;
#[cfg(feature = "mock")]
pub use providers::MockProvider;
pub use sessions::SessionStore;
pub use state::AuthState;
