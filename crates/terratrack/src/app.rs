use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        crops::{list_crops, preview_plan},
        health::{healthz, livez},
        notifications::toggle_notifications,
        plantings::{
            create_planting, delete_planting, get_planting, list_plantings, send_reminder,
            update_planting, upload_image,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // API routes with CORS
    let api_routes = Router::new()
        // Planting routes
        .route("/plantings", get(list_plantings).post(create_planting))
        .route(
            "/plantings/{id}",
            get(get_planting)
                .put(update_planting)
                .delete(delete_planting),
        )
        .route("/plantings/{id}/image", post(upload_image))
        .route("/plantings/{id}/remind", post(send_reminder))
        // Catalog routes
        .route("/crops", get(list_crops))
        .route("/crops/{name}/plan", get(preview_plan))
        // Preferences
        .route("/notifications", post(toggle_notifications))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .merge(terratrack_auth::auth_routes().with_state(state.auth.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
