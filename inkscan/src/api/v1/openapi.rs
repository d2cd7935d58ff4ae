use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inkscan API",
        version = "1.0.0",
        description = "Image-to-text scanning. Upload an image or point at a hosted one, get the extracted text back and browse the scan history.",
    ),
    paths(
        handlers::health::health_check,
        handlers::scans::list_scans,
        handlers::scans::create_scan,
        handlers::scans::upload_scan,
        handlers::scans::get_scan,
        handlers::scans::get_scan_text,
        handlers::scans::scan_status,
        handlers::stats::get_stats,
        handlers::uploads::upload_image,
        handlers::admin::reset_scans,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Scans
        dto::ProcessUrlRequest,
        dto::ListScansQuery,
        dto::ScanResponse,
        dto::ListScansResponse,
        dto::ScanStatusResponse,
        dto::StatsResponse,
        dto::UploadImageResponse,
        dto::ResetScansResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::OcrStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "scans", description = "Scan submission, history and export"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "uploads", description = "Image hosting without OCR"),
        (name = "admin", description = "Administrative operations"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
