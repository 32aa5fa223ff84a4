use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cryptographically random session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported OIDC providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OidcProvider {
    Cognito,
}

impl std::fmt::Display for OidcProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cognito => write!(f, "cognito"),
        }
    }
}

/// Authenticated user session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: Uuid,
    pub provider: OidcProvider,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for a user authenticated by the given provider,
    /// expiring `ttl` from now.
    pub fn new(user_id: Uuid, provider: OidcProvider, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: super::generate_session_id(),
            user_id,
            provider,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the session is past its expiry at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Provider-agnostic claims extracted from an OIDC ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcClaims {
    /// Provider's unique user identifier.
    pub subject: String,
    /// User's email address.
    pub email: Option<String>,
    /// User's display name.
    pub name: Option<String>,
    /// Which provider issued these claims.
    pub provider: OidcProvider,
}

/// PKCE and state data stored during an auth flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthFlowState {
    pub pkce_verifier: String,
    pub provider: OidcProvider,
    pub created_at: DateTime<Utc>,
    /// URL to redirect to after successful authentication.
    pub return_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new_derives_expiry_from_ttl() {
        let user_id = Uuid::new_v4();
        let session = Session::new(user_id, OidcProvider::Cognito, Duration::days(7));

        assert_eq!(session.user_id, user_id);
        assert_eq!(session.expires_at, session.created_at + Duration::days(7));
        assert_eq!(session.id.as_str().len(), 32);
    }

    #[test]
    fn test_session_ids_are_unique() {
        let user_id = Uuid::new_v4();
        let a = Session::new(user_id, OidcProvider::Cognito, Duration::hours(1));
        let b = Session::new(user_id, OidcProvider::Cognito, Duration::hours(1));

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_session_not_expired_before_expiry() {
        let session = Session::new(Uuid::new_v4(), OidcProvider::Cognito, Duration::hours(1));

        assert!(!session.is_expired(session.created_at));
        assert!(!session.is_expired(session.expires_at - Duration::seconds(1)));
    }

    #[test]
    fn test_session_expired_at_and_after_expiry() {
        let session = Session::new(Uuid::new_v4(), OidcProvider::Cognito, Duration::hours(1));

        assert!(session.is_expired(session.expires_at));
        assert!(session.is_expired(session.expires_at + Duration::hours(1)));
    }
}
