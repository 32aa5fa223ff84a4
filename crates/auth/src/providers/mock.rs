//! Mock OIDC provider for development and testing.
//!
//! Stands in for the Cognito hosted UI when no user pool is available. The
//! authorization URL points at a local sign-in page, and the "authorization
//! code" is base64-encoded JSON carrying the claims directly.

use async_trait::async_trait;
use base64::Engine;
use terratrack_core::auth::{AuthError, OidcClaims, OidcProvider, OidcProviderClient, Result};
use url::Url;

/// Mock OIDC provider that round-trips claims through the authorization code.
pub struct MockProvider {
    mock_idp_url: Url,
    redirect_uri: Url,
}

impl MockProvider {
    /// Create a new MockProvider.
    ///
    /// # Arguments
    /// * `mock_idp_url` - The URL of the mock sign-in server (e.g., http://localhost:3001)
    /// * `redirect_uri` - The callback URL for the main app
    pub fn new(mock_idp_url: Url, redirect_uri: Url) -> Self {
        Self {
            mock_idp_url,
            redirect_uri,
        }
    }
}

#[async_trait]
impl OidcProviderClient for MockProvider {
    async fn authorization_url(&self, state: &str, _pkce_challenge: &str) -> Result<Url> {
        let mut url = self
            .mock_idp_url
            .join("/authorize")
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("state", state)
            .append_pair("redirect_uri", self.redirect_uri.as_str());

        Ok(url)
    }

    async fn exchange_code(&self, code: &str, _pkce_verifier: &str) -> Result<OidcClaims> {
        // Decode the mock code (it contains the user info)
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(code)
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        let json: serde_json::Value =
            serde_json::from_slice(&decoded).map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        let subject = json["sub"]
            .as_str()
            .ok_or_else(|| AuthError::MissingClaim("sub".to_string()))?
            .to_string();

        Ok(OidcClaims {
            subject,
            email: json["email"].as_str().map(String::from),
            name: json["name"].as_str().map(String::from),
            provider: OidcProvider::Cognito,
        })
    }

    fn provider(&self) -> OidcProvider {
        OidcProvider::Cognito
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> MockProvider {
        MockProvider::new(
            Url::parse("http://localhost:3001").unwrap(),
            Url::parse("http://localhost:3000/auth/callback").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_authorization_url() {
        let provider = test_provider();

        let url = provider
            .authorization_url("test-state", "test-challenge")
            .await
            .unwrap();

        assert!(url.path().contains("/authorize"));
        assert!(url.query().unwrap().contains("state=test-state"));
    }

    #[tokio::test]
    async fn test_exchange_code() {
        let provider = test_provider();

        let mock_code = base64::engine::general_purpose::STANDARD.encode(
            serde_json::json!({
                "email": "test@example.com",
                "name": "Test User",
                "sub": "mock-test@example.com",
            })
            .to_string(),
        );

        let claims = provider
            .exchange_code(&mock_code, "verifier")
            .await
            .unwrap();

        assert_eq!(claims.email, Some("test@example.com".to_string()));
        assert_eq!(claims.name, Some("Test User".to_string()));
        assert_eq!(claims.subject, "mock-test@example.com");
        assert_eq!(claims.provider, OidcProvider::Cognito);
    }

    #[tokio::test]
    async fn test_exchange_code_missing_subject() {
        let provider = test_provider();

        let mock_code = base64::engine::general_purpose::STANDARD
            .encode(serde_json::json!({"email": "test@example.com"}).to_string());

        let result = provider.exchange_code(&mock_code, "verifier").await;
        assert!(matches!(result, Err(AuthError::MissingClaim(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_invalid() {
        let provider = test_provider();

        let result = provider.exchange_code("invalid-code", "verifier").await;
        assert!(result.is_err());
    }
}
