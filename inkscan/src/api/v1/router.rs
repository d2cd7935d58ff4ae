use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let scans = Router::new()
        .route(
            "/",
            get(handlers::scans::list_scans).post(handlers::scans::create_scan),
        )
        .route("/{scanId}", get(handlers::scans::get_scan))
        .route("/{scanId}/text", get(handlers::scans::get_scan_text));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/scans:upload", post(handlers::scans::upload_scan))
        .route("/scans:status", get(handlers::scans::scan_status))
        .nest("/scans", scans)
        .route("/stats", get(handlers::stats::get_stats))
        .route("/uploads", post(handlers::uploads::upload_image))
        .route("/admin/scans:reset", post(handlers::admin::reset_scans))
}
