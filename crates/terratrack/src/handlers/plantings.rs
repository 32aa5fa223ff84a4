//! Planting CRUD handlers.
//!
//! All routes require an authenticated user. Ownership is enforced on every
//! id-addressed route; plantings belonging to another user answer 404.

use axum::{
    body::Bytes,
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use terratrack_auth::CurrentUser;
use terratrack_core::notify::harvest_reminder;
use terratrack_core::plan::{calculate_plan, PlanError};
use terratrack_core::tracker::{classify_plantings, validate_planting, GroupedPlantings, Planting};

use crate::{
    handlers::AppError,
    models::{CreatePlanting, UpdatePlanting},
    state::AppState,
};

/// Error response with message (for form validation errors).
fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, String) {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, msg)
}

/// Fetches a planting and enforces ownership.
///
/// Missing plantings and plantings owned by another user both answer 404 so
/// ids cannot be enumerated.
async fn fetch_owned(state: &AppState, id: Uuid, user_id: Uuid) -> Result<Planting, Response> {
    match state.planting_repo.get_planting(id).await {
        Ok(Some(planting)) if planting.user_id == user_id => Ok(planting),
        Ok(_) => {
            Err(error_response(StatusCode::NOT_FOUND, "Planting not found").into_response())
        }
        Err(e) => Err(AppError::from(e).into_response()),
    }
}

/// Recomputes a planting's care plan from the catalog.
///
/// Unknown crops answer 422 since the crop name came from client input.
fn recompute_plan(state: &AppState, planting: &mut Planting) -> Result<(), Response> {
    match calculate_plan(&planting.crop_name, planting.planting_date, &state.catalog) {
        Ok(plan) => {
            planting.plan = plan;
            Ok(())
        }
        Err(e @ PlanError::UnknownCrop(_)) => {
            Err(error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response())
        }
        Err(e) => Err(AppError::from(e).into_response()),
    }
}

// ============================================================================
// List Plantings
// ============================================================================

/// List the current user's plantings (GET /api/plantings).
///
/// Plantings are classified by harvest date into ongoing, upcoming (within
/// seven days), and past.
pub async fn list_plantings(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<GroupedPlantings>, AppError> {
    let plantings = state.planting_repo.get_plantings_by_user(user.id).await?;
    let today = chrono::Local::now().date_naive();

    Ok(Json(classify_plantings(plantings, today)))
}

// ============================================================================
// Create Planting
// ============================================================================

/// Create a new planting (POST /api/plantings).
pub async fn create_planting(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    form_result: Result<Form<CreatePlanting>, FormRejection>,
) -> Result<impl IntoResponse, Response> {
    let Form(payload) = form_result.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse form: {e}"),
        )
        .into_response()
    })?;

    validate_planting(&payload.crop_name, payload.notes.as_deref()).map_err(|e| {
        error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
    })?;

    let plan = match calculate_plan(&payload.crop_name, payload.planting_date, &state.catalog) {
        Ok(plan) => plan,
        Err(e @ PlanError::UnknownCrop(_)) => {
            return Err(
                error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
            );
        }
        Err(e) => return Err(AppError::from(e).into_response()),
    };

    let planting = payload.into_planting(user.id, plan);
    state
        .planting_repo
        .create_planting(&planting)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(planting_id = %planting.id, crop = %planting.crop_name, "Planting created");
    Ok((StatusCode::CREATED, Json(planting)))
}

// ============================================================================
// Get / Update / Delete Planting
// ============================================================================

/// Fetch a single planting (GET /api/plantings/{id}).
pub async fn get_planting(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Planting>, Response> {
    let planting = fetch_owned(&state, id, user.id).await?;
    Ok(Json(planting))
}

/// Partially update a planting (PUT /api/plantings/{id}).
///
/// The care plan is recomputed when the crop or planting date changes;
/// the image URL is always preserved.
pub async fn update_planting(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    form_result: Result<Form<UpdatePlanting>, FormRejection>,
) -> Result<Json<Planting>, Response> {
    let Form(payload) = form_result.map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Failed to parse form: {e}"),
        )
        .into_response()
    })?;

    let mut planting = fetch_owned(&state, id, user.id).await?;
    let plan_stale = payload.apply_to(&mut planting);

    validate_planting(&planting.crop_name, planting.notes.as_deref()).map_err(|e| {
        error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
    })?;

    if plan_stale {
        recompute_plan(&state, &mut planting)?;
    }

    state
        .planting_repo
        .update_planting(&planting)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    Ok(Json(planting))
}

/// Delete a planting (DELETE /api/plantings/{id}).
///
/// The planting's image is removed from storage as well; a failed image
/// delete is logged but does not block the record delete.
pub async fn delete_planting(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Response> {
    let planting = fetch_owned(&state, id, user.id).await?;

    if let Some(image_url) = &planting.image_url {
        if let Err(e) = state.image_store.delete_image(image_url).await {
            tracing::warn!(planting_id = %id, error = %e, "Failed to delete planting image");
        }
    }

    state
        .planting_repo
        .delete_planting(id)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(planting_id = %id, "Planting deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Image Upload
// ============================================================================

/// Query parameters for image upload.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    /// Original filename; its extension is kept on the stored object.
    pub filename: String,
}

/// Attach an image to a planting (POST /api/plantings/{id}/image).
///
/// The request body is the raw image bytes. Replacing an image deletes the
/// previous object.
pub async fn upload_image(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ImageQuery>,
    body: Bytes,
) -> Result<Json<Planting>, Response> {
    if body.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Empty image body").into_response());
    }

    let mut planting = fetch_owned(&state, id, user.id).await?;

    let url = state
        .image_store
        .put_image(user.id, &query.filename, body.to_vec())
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    if let Some(old_url) = planting.image_url.replace(url) {
        if let Err(e) = state.image_store.delete_image(&old_url).await {
            tracing::warn!(planting_id = %id, error = %e, "Failed to delete replaced image");
        }
    }
    planting.updated_at = Utc::now();

    state
        .planting_repo
        .update_planting(&planting)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    Ok(Json(planting))
}

// ============================================================================
// Harvest Reminder
// ============================================================================

/// Send a harvest reminder for a planting (POST /api/plantings/{id}/remind).
///
/// Answers 409 when the user has notifications disabled or no email, and
/// 422 when the planting has no dated tasks to remind about.
pub async fn send_reminder(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Response> {
    let planting = fetch_owned(&state, id, user.id).await?;

    if !user.notifications_enabled || user.email.is_empty() {
        return Err(error_response(
            StatusCode::CONFLICT,
            "Notifications are disabled for this account",
        )
        .into_response());
    }

    let Some(due_date) = planting.harvest_date() else {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Planting has no dated care tasks",
        )
        .into_response());
    };

    let (subject, message) =
        harvest_reminder(&planting.crop_name, planting.planting_date, due_date);
    let message_id = state
        .notifier
        .send(&user.email, &subject, &message)
        .await
        .map_err(|e| AppError::from(e).into_response())?;

    tracing::info!(planting_id = %id, email = %user.email, "Harvest reminder sent");
    Ok(Json(serde_json::json!({
        "sent": true,
        "message_id": message_id,
    })))
}
