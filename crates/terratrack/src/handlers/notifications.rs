//! Notification preference handler.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;

use terratrack_auth::CurrentUser;

use crate::{handlers::AppError, models::NotificationSettings, state::AppState};

/// Toggle harvest notifications (POST /api/notifications).
///
/// Enabling notifications also subscribes the user's email to the
/// notification topic; a failed subscribe is logged but does not fail the
/// toggle, since the preference itself was persisted.
pub async fn toggle_notifications(
    CurrentUser(mut user): CurrentUser,
    State(state): State<AppState>,
    form_result: Result<Form<NotificationSettings>, FormRejection>,
) -> Result<Json<serde_json::Value>, Response> {
    let Form(payload) = form_result.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to parse form: {e}"),
        )
            .into_response()
    })?;

    user.notifications_enabled = payload.enabled;
    user.updated_at = Utc::now();

    state
        .user_repo
        .update_user(&user)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    if payload.enabled && !user.email.is_empty() {
        match state.notifier.subscribe_email(&user.email).await {
            Ok(_) => {
                tracing::info!(email = %user.email, "Subscribed email to notifications");
            }
            Err(e) => {
                tracing::warn!(email = %user.email, error = %e, "Email subscription failed");
            }
        }
    }

    Ok(Json(serde_json::json!({
        "notifications_enabled": payload.enabled,
    })))
}
