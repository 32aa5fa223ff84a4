//! OIDC provider implementations.
//!
//! This module contains implementations of `OidcProviderClient` for:
//! - Amazon Cognito
//! - A mock provider for development (behind the `mock` feature)

mod cognito;
#[cfg(feature = "mock")]
mod mock;

pub use cognito::CognitoProvider;
#[cfg(feature = "mock")]
pub use mock::MockProvider;
