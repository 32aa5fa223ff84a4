//! Axum extractors for authentication.
//!
//! Requests authenticate with a session id carried either in an
//! `Authorization: Bearer` header (API clients) or in the session cookie
//! (web clients). Both extractors resolve the session to its [`User`].

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use terratrack_core::auth::SessionId;
use terratrack_core::tracker::User;

use crate::AuthState;

type Rejection = (StatusCode, &'static str);

/// Extractor for the authenticated user. Rejects with 401 when the request
/// carries no valid session.
pub struct CurrentUser(pub User);

/// Extractor for an optionally authenticated user. Yields `None` instead of
/// rejecting the request.
pub struct OptionalUser(pub Option<User>);

/// Pulls the session id out of the request, preferring the bearer token
/// over the cookie.
fn session_id_from_parts(parts: &Parts, cookie_name: &str) -> Option<SessionId> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        return Some(SessionId::new(token.to_string()));
    }

    CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|cookie| SessionId::new(cookie.value().to_string()))
}

async fn resolve_user(auth: &AuthState, parts: &Parts) -> Result<User, Rejection> {
    let session_id = session_id_from_parts(parts, &auth.config.cookie_name)
        .ok_or((StatusCode::UNAUTHORIZED, "Not signed in"))?;

    let session = auth
        .sessions
        .get_session(&session_id)
        .await
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Session lookup failed"))?
        .ok_or((StatusCode::UNAUTHORIZED, "Session not found"))?;

    if session.is_expired(Utc::now()) {
        return Err((StatusCode::UNAUTHORIZED, "Session expired"));
    }

    auth.users
        .get_user(session.user_id)
        .await
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "User lookup failed"))?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found"))
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);
        resolve_user(&auth, parts).await.map(CurrentUser)
    }
}

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);
        Ok(OptionalUser(resolve_user(&auth, parts).await.ok()))
    }
}
