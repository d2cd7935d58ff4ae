#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{TimeZone, Utc};
use wiremock::MockServer;

use inkscan::config::{OcrConfig, ScanConfig, UploadConfig};
use inkscan::models::{ImageFile, ScanResult};
use inkscan::ocr::OcrProvider;
use inkscan::services::{ScanSeed, ScanStore};
use inkscan::upload::UploadClient;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub const CLOUD_NAME: &str = "demo";
pub const UPLOAD_PATH: &str = "/v1_1/demo/image/upload";
pub const OCR_PATH: &str = "/ocr";

/// Smallest byte sequence `infer` recognizes as a PNG.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 24]);
    bytes
}

pub fn png_file() -> ImageFile {
    ImageFile::new(png_bytes())
        .with_name("page.png")
        .with_content_type("image/png")
}

pub fn upload_config(server: &MockServer) -> UploadConfig {
    UploadConfig {
        base_url: server.uri(),
        cloud_name: CLOUD_NAME.to_string(),
        upload_preset: "unsigned".to_string(),
        timeout_secs: 5,
    }
}

pub fn ocr_config(server: Option<&MockServer>) -> OcrConfig {
    OcrConfig {
        url: server.map(|s| format!("{}{}", s.uri(), OCR_PATH)),
        timeout_secs: 5,
    }
}

pub async fn store_with(
    upload_server: &MockServer,
    ocr_server: Option<&MockServer>,
    seed: Arc<dyn ScanSeed>,
) -> ScanStore {
    init_test_logger();
    let upload = UploadClient::new(&upload_config(upload_server)).unwrap();
    let ocr = OcrProvider::new(&ocr_config(ocr_server)).unwrap();
    ScanStore::new(upload, ocr, seed, &ScanConfig::default())
        .await
        .unwrap()
}

pub fn scan(id: &str, confidence: f64, day: u32) -> ScanResult {
    ScanResult {
        id: id.to_string(),
        user_id: "1".to_string(),
        image_url: format!("https://host/{id}.png"),
        extracted_text: format!("Scan {id}"),
        confidence,
        created_at: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
    }
}

/// Raw byte search; multipart bodies carry binary image data.
pub fn body_contains(body: &[u8], needle: &str) -> bool {
    body.windows(needle.len()).any(|w| w == needle.as_bytes())
}
