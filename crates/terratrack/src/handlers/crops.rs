//! Crop catalog handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use terratrack_core::plan::{calculate_plan, PlanError, PlanTask};

use crate::{handlers::AppError, models::PlanQuery, state::AppState};

/// Catalog entry as returned by the API: the crop name plus its ongoing
/// care instructions.
#[derive(Debug, Serialize)]
pub struct CropSummary {
    pub name: String,
    pub ongoing_tasks: Vec<String>,
}

/// List the crop catalog (GET /api/crops).
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropSummary>> {
    let crops = state
        .catalog
        .crops
        .iter()
        .map(|crop| CropSummary {
            name: crop.name.clone(),
            ongoing_tasks: crop
                .ongoing_tasks()
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect();

    Json(crops)
}

/// Preview the care plan for a crop (GET /api/crops/{name}/plan).
///
/// Computes the dated schedule for the given planting date without saving
/// anything. Unknown crop names answer 404 since the crop is the resource
/// being addressed.
pub async fn preview_plan(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PlanQuery>,
) -> Result<Json<Vec<PlanTask>>, Response> {
    match calculate_plan(&name, query.planting_date, &state.catalog) {
        Ok(plan) => Ok(Json(plan)),
        Err(e @ PlanError::UnknownCrop(_)) => {
            Err((StatusCode::NOT_FOUND, e.to_string()).into_response())
        }
        Err(e) => Err(AppError::from(e).into_response()),
    }
}
