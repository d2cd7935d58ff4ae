use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::error::Result;
use crate::models::{
    DashboardStats, HistoryPage, HistoryQuery, ImageFile, ImageInput, ScanResult,
};
use crate::ocr::OcrProvider;
use crate::upload::UploadClient;

use super::seed::ScanSeed;

/// Clears the busy flag when dropped, whichever way processing ends.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

struct StoreInner {
    scans: RwLock<Vec<ScanResult>>,
    processing: AtomicBool,
    upload: UploadClient,
    ocr: OcrProvider,
    seed: Arc<dyn ScanSeed>,
    user_id: String,
    page_size: usize,
}

/// In-memory scan history plus the upload/OCR orchestration that feeds it.
///
/// Scans are kept most-recent-first and never modified once stored. The
/// busy flag is advisory: concurrent `process_image` calls are not
/// serialized, and whichever call finishes first clears the flag.
#[derive(Clone)]
pub struct ScanStore {
    inner: Arc<StoreInner>,
}

impl ScanStore {
    pub async fn new(
        upload: UploadClient,
        ocr: OcrProvider,
        seed: Arc<dyn ScanSeed>,
        config: &ScanConfig,
    ) -> Result<Self> {
        let initial = seed.load().await?;
        info!(count = initial.len(), "Scan store seeded");

        Ok(Self {
            inner: Arc::new(StoreInner {
                scans: RwLock::new(initial),
                processing: AtomicBool::new(false),
                upload,
                ocr,
                seed,
                user_id: config.user_id.clone(),
                page_size: config.page_size.max(1),
            }),
        })
    }

    /// Runs one image through upload (file input only) and OCR, then
    /// prepends the result. Nothing is stored when either call fails.
    pub async fn process_image(&self, input: impl Into<ImageInput>) -> Result<ScanResult> {
        let _guard = ProcessingGuard::start(&self.inner.processing);

        let (image_url, output) = match input.into() {
            ImageInput::Url(url) => {
                let output = self.inner.ocr.ocr_url(&url).await?;
                (url, output)
            }
            ImageInput::File(file) => {
                self.inner.ocr.ensure_available()?;
                let hosted_url = self.inner.upload.upload(&file).await?;
                let output = self.inner.ocr.ocr_file(&file).await?;
                (hosted_url, output)
            }
        };

        let result = ScanResult {
            id: output.id,
            user_id: self.inner.user_id.clone(),
            image_url,
            extracted_text: output.text,
            confidence: output.confidence,
            created_at: Utc::now(),
        };

        self.inner.scans.write().await.insert(0, result.clone());
        info!(scan_id = %result.id, confidence = result.confidence, "Scan stored");

        Ok(result)
    }

    pub async fn upload_image(&self, file: &ImageFile) -> Result<String> {
        self.inner.upload.upload(file).await
    }

    pub fn is_processing(&self) -> bool {
        self.inner.processing.load(Ordering::SeqCst)
    }

    pub fn ocr_available(&self) -> bool {
        self.inner.ocr.is_available()
    }

    pub async fn stats(&self) -> DashboardStats {
        DashboardStats::from_scans(&self.inner.scans.read().await)
    }

    pub async fn scans(&self) -> Vec<ScanResult> {
        self.inner.scans.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.scans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn get(&self, id: &str) -> Option<ScanResult> {
        self.inner
            .scans
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub async fn history(&self, query: &HistoryQuery) -> HistoryPage {
        HistoryPage::build(&self.inner.scans.read().await, query, self.inner.page_size)
    }

    /// Replaces the whole list with a fresh load from the seed source.
    /// On a seed failure the current list is kept.
    pub async fn reset(&self) -> Result<usize> {
        let fresh = self.inner.seed.load().await?;
        let count = fresh.len();
        *self.inner.scans.write().await = fresh;
        debug!(count, "Scan store reset");
        Ok(count)
    }
}
