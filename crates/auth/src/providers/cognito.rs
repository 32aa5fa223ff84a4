//! Amazon Cognito OIDC provider.

use async_trait::async_trait;
use openidconnect::{
    core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata},
    reqwest, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointMaybeSet,
    EndpointNotSet, EndpointSet, IssuerUrl, Nonce, PkceCodeVerifier, RedirectUrl, Scope,
    TokenResponse,
};
use terratrack_core::auth::{AuthError, OidcClaims, OidcProvider, OidcProviderClient, Result};
use url::Url;

use crate::config::CognitoConfig;

/// Client type produced by discovery: Cognito's metadata always carries the
/// authorize endpoint; the token and userinfo endpoints may be absent.
type DiscoveredClient = CoreClient<
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointMaybeSet,
    EndpointMaybeSet,
>;

/// OIDC client for an Amazon Cognito user pool.
///
/// Discovery runs against the pool's issuer
/// (`https://cognito-idp.<region>.amazonaws.com/<pool_id>`); the discovered
/// authorize and token endpoints live on the pool's hosted UI domain.
pub struct CognitoProvider {
    client: DiscoveredClient,
    http_client: reqwest::Client,
}

impl CognitoProvider {
    /// Discovers the user pool's OIDC metadata and builds the client.
    pub async fn new(config: &CognitoConfig) -> Result<Self> {
        let issuer =
            IssuerUrl::new(config.issuer_url()).map_err(|e| AuthError::Provider(e.to_string()))?;
        let redirect = RedirectUrl::new(config.redirect_uri.to_string())
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        // Token requests must not follow redirects.
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Provider(format!("failed to build HTTP client: {e}")))?;

        let metadata = CoreProviderMetadata::discover_async(issuer, &http_client)
            .await
            .map_err(|e| AuthError::Provider(format!("Cognito discovery failed: {e}")))?;
        tracing::debug!(issuer = %config.issuer_url(), "Discovered Cognito provider metadata");

        let client = CoreClient::from_provider_metadata(
            metadata,
            ClientId::new(config.client_id.clone()),
            config.client_secret.clone().map(ClientSecret::new),
        )
        .set_redirect_uri(redirect);

        Ok(Self {
            client,
            http_client,
        })
    }
}

#[async_trait]
impl OidcProviderClient for CognitoProvider {
    async fn authorization_url(&self, state: &str, pkce_challenge: &str) -> Result<Url> {
        // The PKCE challenge arrives pre-computed (its verifier lives in the
        // stored auth flow), so it goes on the request as extra params
        // rather than through the builder's own PKCE support.
        let state = state.to_owned();
        let (url, _state, _nonce) = self
            .client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                move || CsrfToken::new(state),
                Nonce::new_random,
            )
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .add_extra_param("code_challenge", pkce_challenge)
            .add_extra_param("code_challenge_method", "S256")
            .url();

        Ok(url)
    }

    async fn exchange_code(&self, code: &str, pkce_verifier: &str) -> Result<OidcClaims> {
        let tokens = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthError::CodeExchange(e.to_string()))?;

        let id_token = tokens
            .id_token()
            .ok_or_else(|| AuthError::InvalidToken("no ID token in response".to_string()))?;
        let claims = id_token
            .claims(&self.client.id_token_verifier(), |_: Option<&Nonce>| Ok(()))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        // Pools without a name attribute still set preferred_username.
        let name = claims
            .name()
            .and_then(|n| n.get(None))
            .map(|n| n.to_string())
            .or_else(|| claims.preferred_username().map(|u| u.to_string()));

        Ok(OidcClaims {
            subject: claims.subject().to_string(),
            email: claims.email().map(|e| e.to_string()),
            name,
            provider: OidcProvider::Cognito,
        })
    }

    fn provider(&self) -> OidcProvider {
        OidcProvider::Cognito
    }
}
