//! v1 Scan handlers.
//!
//! Scan submission (image URL or multipart file), history listing with
//! search and pagination, detail lookup, plain-text export and the advisory
//! processing status. All JSON responses use the [`ApiResponse`] envelope.

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;
use validator::Validate;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{
    ListScansQuery, ListScansResponse, ProcessUrlRequest, ScanResponse, ScanStatusResponse,
};
use crate::api::v1::handlers::read_image_field;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;
use crate::models::{HistoryQuery, ImageInput};

fn parse_image_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("imageUrl cannot be empty".to_string());
    }
    let parsed = url::Url::parse(trimmed).map_err(|e| format!("Invalid URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(format!("Unsupported URL scheme: {other}")),
    }
}

/// `GET /api/v1/scans`
///
/// Lists scans newest first, optionally filtered by `q`.
#[utoipa::path(
    get,
    path = "/api/v1/scans",
    tag = "scans",
    operation_id = "scans.list",
    params(ListScansQuery),
    responses(
        (status = 200, description = "One page of scan history", body = ListScansResponse),
        (status = 400, description = "Invalid pagination parameters", body = ApiError),
    )
)]
pub async fn list_scans(
    State(state): State<AppState>,
    Query(query): Query<ListScansQuery>,
) -> ApiResponse<ListScansResponse> {
    let query: HistoryQuery = query.into();
    if let Err(e) = query.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, e.to_string());
    }

    let page = state.store.history(&query).await;
    let meta = ResponseMeta {
        total: Some(page.total as u64),
        total_pages: Some(page.total_pages as u64),
    };

    ApiResponse::success_with_meta(
        ListScansResponse {
            scans: page.items.into_iter().map(Into::into).collect(),
            page: page.page,
            per_page: page.per_page,
        },
        meta,
    )
}

/// `POST /api/v1/scans`
///
/// Runs OCR on an already-hosted image and stores the result.
#[utoipa::path(
    post,
    path = "/api/v1/scans",
    tag = "scans",
    operation_id = "scans.create",
    request_body = ProcessUrlRequest,
    responses(
        (status = 201, description = "Scan stored", body = ScanResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 501, description = "OCR endpoint not configured", body = ApiError),
        (status = 502, description = "OCR service failed", body = ApiError),
    )
)]
pub async fn create_scan(
    State(state): State<AppState>,
    AppJson(req): AppJson<ProcessUrlRequest>,
) -> ApiResponse<ScanResponse> {
    let image_url = match parse_image_url(&req.image_url) {
        Ok(url) => url,
        Err(message) => return ApiResponse::error(ErrorCode::InvalidRequest, message),
    };

    match state.store.process_image(ImageInput::Url(image_url)).await {
        Ok(scan) => ApiResponse::created(scan.into()),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/scans:upload`
///
/// Accepts `multipart/form-data` with a `file` field. The image is stored on
/// the asset host, then sent to OCR.
#[utoipa::path(
    post,
    path = "/api/v1/scans:upload",
    tag = "scans",
    operation_id = "scans.upload",
    request_body(content_type = "multipart/form-data", description = "Image in field `file`"),
    responses(
        (status = 201, description = "Scan stored", body = ScanResponse),
        (status = 400, description = "Missing or invalid image", body = ApiError),
        (status = 501, description = "OCR endpoint not configured", body = ApiError),
        (status = 502, description = "Upload or OCR service failed", body = ApiError),
    )
)]
pub async fn upload_scan(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<ScanResponse> {
    let image = match read_image_field(&mut multipart, state.max_file_size()).await {
        Ok(image) => image,
        Err(e) => return e.into(),
    };

    match state.store.process_image(ImageInput::File(image)).await {
        Ok(scan) => ApiResponse::created(scan.into()),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/scans/{scanId}`
#[utoipa::path(
    get,
    path = "/api/v1/scans/{scanId}",
    tag = "scans",
    operation_id = "scans.get",
    params(("scanId" = String, Path, description = "Scan ID")),
    responses(
        (status = 200, description = "Scan found", body = ScanResponse),
        (status = 404, description = "Scan not found", body = ApiError),
    )
)]
pub async fn get_scan(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> ApiResponse<ScanResponse> {
    match state.store.get(&scan_id).await {
        Some(scan) => ApiResponse::success(scan.into()),
        None => ApiResponse::error(ErrorCode::NotFound, format!("Scan {scan_id} not found")),
    }
}

/// `GET /api/v1/scans/{scanId}/text`
///
/// Downloads the extracted text as a `.txt` attachment.
#[utoipa::path(
    get,
    path = "/api/v1/scans/{scanId}/text",
    tag = "scans",
    operation_id = "scans.text",
    params(("scanId" = String, Path, description = "Scan ID")),
    responses(
        (status = 200, description = "Extracted text", content_type = "text/plain", body = String),
        (status = 404, description = "Scan not found", body = ApiError),
    )
)]
pub async fn get_scan_text(
    State(state): State<AppState>,
    Path(scan_id): Path<String>,
) -> Response {
    let Some(scan) = state.store.get(&scan_id).await else {
        return ApiResponse::<()>::error(ErrorCode::NotFound, format!("Scan {scan_id} not found"))
            .into_response();
    };

    let disposition = format!("attachment; filename=\"{}\"", scan.export_file_name());
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        scan.extracted_text,
    )
        .into_response()
}

/// `GET /api/v1/scans:status`
#[utoipa::path(
    get,
    path = "/api/v1/scans:status",
    tag = "scans",
    operation_id = "scans.status",
    responses(
        (status = 200, description = "Processing flag and scan count", body = ScanStatusResponse),
    )
)]
pub async fn scan_status(State(state): State<AppState>) -> ApiResponse<ScanStatusResponse> {
    ApiResponse::success(ScanStatusResponse {
        is_processing: state.store.is_processing(),
        total_scans: state.store.len().await,
    })
}
