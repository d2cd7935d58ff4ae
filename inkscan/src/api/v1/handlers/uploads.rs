use axum::extract::{Multipart, State};

use crate::api::v1::dto::UploadImageResponse;
use crate::api::v1::handlers::read_image_field;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `POST /api/v1/uploads`
///
/// Stores an image on the asset host without running OCR and returns its URL.
#[utoipa::path(
    post,
    path = "/api/v1/uploads",
    tag = "uploads",
    operation_id = "uploads.create",
    request_body(content_type = "multipart/form-data", description = "Image in field `file`"),
    responses(
        (status = 201, description = "Image hosted", body = UploadImageResponse),
        (status = 400, description = "Missing or invalid image", body = ApiError),
        (status = 502, description = "Asset host failed", body = ApiError),
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<UploadImageResponse> {
    let image = match read_image_field(&mut multipart, state.max_file_size()).await {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    match state.store.upload_image(&image).await {
        Ok(url) => ApiResponse::created(UploadImageResponse { url }),
        Err(e) => e.into(),
    }
}
