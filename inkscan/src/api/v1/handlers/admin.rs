use axum::extract::State;

use crate::api::v1::dto::ResetScansResponse;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `POST /api/v1/admin/scans:reset`
///
/// Drops every scan and reloads the configured seed set.
#[utoipa::path(
    post,
    path = "/api/v1/admin/scans:reset",
    tag = "admin",
    operation_id = "admin.resetScans",
    responses(
        (status = 200, description = "Store reset", body = ResetScansResponse),
        (status = 500, description = "Seed could not be loaded", body = ApiError),
    )
)]
pub async fn reset_scans(State(state): State<AppState>) -> ApiResponse<ResetScansResponse> {
    match state.store.reset().await {
        Ok(count) => {
            tracing::info!(count, "Scan store reset via admin endpoint");
            ApiResponse::success(ResetScansResponse { count })
        }
        Err(e) => e.into(),
    }
}
