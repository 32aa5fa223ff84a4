use std::time::Duration;

use url::Url;

/// Cognito user pool configuration.
#[derive(Debug, Clone)]
pub struct CognitoConfig {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub region: String,
    pub user_pool_id: String,
    pub redirect_uri: Url,
}

impl CognitoConfig {
    /// The OIDC issuer for this user pool. Cognito publishes its discovery
    /// document here; the discovered authorize endpoint points at the
    /// hosted UI domain.
    pub fn issuer_url(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub cognito: Option<CognitoConfig>,
    pub session_ttl: Duration,
    pub base_url: Url,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUTH_BASE_URL`: Base URL for callback redirects (default: `http://localhost:3000`)
    /// - `COGNITO_CLIENT_ID`: Cognito app client ID (optional, enables Cognito auth)
    /// - `COGNITO_CLIENT_SECRET`: Cognito app client secret (optional; public clients have none)
    /// - `COGNITO_REGION`: AWS region of the user pool (required if Cognito enabled)
    /// - `COGNITO_USER_POOL_ID`: Cognito user pool ID (required if Cognito enabled)
    /// - `SESSION_TTL_DAYS`: Session TTL in days (default: 7)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    ///
    /// # Errors
    ///
    /// Returns an error if Cognito is partially configured (client ID without
    /// region or user pool ID).
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let base_url: Url = std::env::var("AUTH_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .parse()
            .expect("AUTH_BASE_URL must be valid URL");

        let cognito = match std::env::var("COGNITO_CLIENT_ID") {
            Ok(client_id) => Some(CognitoConfig {
                client_id,
                client_secret: std::env::var("COGNITO_CLIENT_SECRET").ok(),
                region: std::env::var("COGNITO_REGION")?,
                user_pool_id: std::env::var("COGNITO_USER_POOL_ID")?,
                redirect_uri: base_url.join("/auth/callback").unwrap(),
            }),
            Err(_) => None,
        };

        let session_ttl = std::env::var("SESSION_TTL_DAYS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|days| Duration::from_secs(days * 24 * 60 * 60))
            .unwrap_or(Duration::from_secs(7 * 24 * 60 * 60)); // 7 days default

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Ok(Self {
            cognito,
            session_ttl,
            base_url,
            cookie_name: "session".to_string(),
            cookie_secure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issuer_url_format() {
        let config = CognitoConfig {
            client_id: "client-abc".to_string(),
            client_secret: None,
            region: "us-east-1".to_string(),
            user_pool_id: "us-east-1_Example".to_string(),
            redirect_uri: Url::parse("http://localhost:3000/auth/callback").unwrap(),
        };

        assert_eq!(
            config.issuer_url(),
            "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_Example"
        );
    }
}
