//! Scan request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/scans` (URL mode).
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessUrlRequest {
    /// Publicly reachable URL of the image to scan.
    pub image_url: String,
}

/// Query parameters for `GET /v1/scans`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListScansQuery {
    /// Case-insensitive match on extracted text, or a `YYYY-MM-DD` date fragment.
    pub q: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<usize>,
    /// Results per page (default from `SCAN_PAGE_SIZE`, max 100).
    pub per_page: Option<usize>,
}

impl From<ListScansQuery> for models::HistoryQuery {
    fn from(q: ListScansQuery) -> Self {
        Self {
            term: q.q,
            page: q.page,
            per_page: q.per_page,
        }
    }
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub scan_id: String,
    pub user_id: String,
    /// Where the source image is hosted.
    pub image_url: String,
    pub extracted_text: String,
    /// OCR confidence in `[0, 1]`.
    pub confidence: f64,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<models::ScanResult> for ScanResponse {
    fn from(scan: models::ScanResult) -> Self {
        Self {
            scan_id: scan.id,
            user_id: scan.user_id,
            image_url: scan.image_url,
            extracted_text: scan.extracted_text,
            confidence: scan.confidence,
            created_at: scan.created_at,
        }
    }
}

/// Response body for `GET /v1/scans`. Totals are also reported in `meta`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListScansResponse {
    pub scans: Vec<ScanResponse>,
    pub page: usize,
    pub per_page: usize,
}

/// Response body for `GET /v1/scans:status`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatusResponse {
    /// Advisory: true while at least the most recent scan is in flight.
    pub is_processing: bool,
    pub total_scans: usize,
}

/// Response body for `GET /v1/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_scans: usize,
    /// Scans with confidence strictly above 0.7.
    pub successful_scans: usize,
    pub average_confidence: f64,
    /// Up to five scans, newest first.
    pub recent_scans: Vec<ScanResponse>,
}

impl From<models::DashboardStats> for StatsResponse {
    fn from(stats: models::DashboardStats) -> Self {
        Self {
            total_scans: stats.total_scans,
            successful_scans: stats.successful_scans,
            average_confidence: stats.average_confidence,
            recent_scans: stats.recent_scans.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response body for `POST /v1/uploads`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub url: String,
}

/// Response body for `POST /v1/admin/scans:reset`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetScansResponse {
    /// Number of scans after the reset.
    pub count: usize,
}
