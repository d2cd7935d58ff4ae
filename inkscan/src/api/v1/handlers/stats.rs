use axum::extract::State;

use crate::api::v1::dto::StatsResponse;
use crate::api::v1::response::ApiResponse;
use crate::api::AppState;

/// `GET /api/v1/stats`
///
/// Dashboard aggregates, recomputed from the full scan list on every call.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "stats",
    operation_id = "stats.get",
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse),
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> ApiResponse<StatsResponse> {
    ApiResponse::success(state.store.stats().await.into())
}
