use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence above which a scan counts as successful.
pub const SUCCESS_THRESHOLD: f64 = 0.7;

/// Number of scans reported in `DashboardStats::recent_scans`.
pub const RECENT_SCANS_LIMIT: usize = 5;

/// One completed extraction. Never mutated after it enters the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub id: String,
    pub user_id: String,
    pub image_url: String,
    pub extracted_text: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl ScanResult {
    pub fn is_successful(&self) -> bool {
        self.confidence > SUCCESS_THRESHOLD
    }

    /// Case-insensitive match on the text, or a plain match on the
    /// `YYYY-MM-DD` creation date. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }

        self.extracted_text
            .to_lowercase()
            .contains(&term.to_lowercase())
            || self.created_at.format("%Y-%m-%d").to_string().contains(term)
    }

    /// File name used when the extracted text is downloaded,
    /// e.g. `scan_a1b2c3d4_2024-05-15.txt`.
    pub fn export_file_name(&self) -> String {
        let short_id: String = self.id.chars().take(8).collect();
        format!(
            "scan_{}_{}.txt",
            short_id,
            self.created_at.format("%Y-%m-%d")
        )
    }
}

/// Aggregates derived from the scan list. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_scans: usize,
    pub successful_scans: usize,
    pub average_confidence: f64,
    pub recent_scans: Vec<ScanResult>,
}

impl DashboardStats {
    pub fn from_scans(scans: &[ScanResult]) -> Self {
        let total_scans = scans.len();
        let successful_scans = scans.iter().filter(|s| s.is_successful()).count();
        let sum: f64 = scans.iter().map(|s| s.confidence).sum();
        let average_confidence = sum / total_scans.max(1) as f64;

        let mut recent_scans = scans.to_vec();
        recent_scans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_scans.truncate(RECENT_SCANS_LIMIT);

        Self {
            total_scans,
            successful_scans,
            average_confidence,
            recent_scans,
        }
    }
}

/// Raw image bytes submitted for scanning.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Name sent in multipart bodies; falls back to `image`.
    pub fn part_name(&self) -> String {
        self.file_name.clone().unwrap_or_else(|| "image".to_string())
    }

    /// MIME type sent in multipart bodies: the declared type, else a guess
    /// from the file name, else sniffed from the bytes.
    pub fn mime_type(&self) -> String {
        if let Some(ct) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return ct.to_string();
        }
        if let Some(mime) = self
            .file_name
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first())
        {
            return mime.essence_str().to_string();
        }
        infer::get(&self.bytes)
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }
}

/// What `ScanStore::process_image` accepts.
#[derive(Debug, Clone)]
pub enum ImageInput {
    File(ImageFile),
    Url(String),
}

impl From<ImageFile> for ImageInput {
    fn from(file: ImageFile) -> Self {
        ImageInput::File(file)
    }
}

impl From<String> for ImageInput {
    fn from(url: String) -> Self {
        ImageInput::Url(url)
    }
}

impl From<&str> for ImageInput {
    fn from(url: &str) -> Self {
        ImageInput::Url(url.to_string())
    }
}
