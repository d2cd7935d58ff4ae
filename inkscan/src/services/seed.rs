use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SeedSource;
use crate::error::{InkscanError, Result};
use crate::models::ScanResult;

const EXAMPLE_SCANS: &str = include_str!("../../seed/example_scans.json");

/// Supplies the records a fresh (or reset) store starts with.
#[async_trait]
pub trait ScanSeed: Send + Sync {
    async fn load(&self) -> Result<Vec<ScanResult>>;
}

/// The bundled example scans.
pub struct ExampleSeed;

#[async_trait]
impl ScanSeed for ExampleSeed {
    async fn load(&self) -> Result<Vec<ScanResult>> {
        Ok(serde_json::from_str(EXAMPLE_SCANS)?)
    }
}

pub struct EmptySeed;

#[async_trait]
impl ScanSeed for EmptySeed {
    async fn load(&self) -> Result<Vec<ScanResult>> {
        Ok(Vec::new())
    }
}

/// A JSON array of scan results read from disk on every load.
pub struct FileSeed {
    path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ScanSeed for FileSeed {
    async fn load(&self) -> Result<Vec<ScanResult>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&raw).map_err(|e| {
            InkscanError::Internal(format!(
                "Invalid seed file {}: {e}",
                self.path.display()
            ))
        })
    }
}

/// Static seed handed in by the caller, mostly useful in tests.
pub struct FixedSeed(pub Vec<ScanResult>);

#[async_trait]
impl ScanSeed for FixedSeed {
    async fn load(&self) -> Result<Vec<ScanResult>> {
        Ok(self.0.clone())
    }
}

pub fn seed_from_source(source: &SeedSource) -> Arc<dyn ScanSeed> {
    match source {
        SeedSource::Examples => Arc::new(ExampleSeed),
        SeedSource::Empty => Arc::new(EmptySeed),
        SeedSource::File(path) => Arc::new(FileSeed::new(path.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_example_seed_parses() {
        let scans = ExampleSeed.load().await.unwrap();
        assert_eq!(scans.len(), 12);
        assert!(scans.iter().all(|s| s.user_id == "1"));
        assert!(scans
            .iter()
            .all(|s| (0.0..=1.0).contains(&s.confidence)));
        assert!(scans[0].extracted_text.starts_with("Meeting Notes"));
    }

    #[tokio::test]
    async fn test_empty_seed() {
        assert!(EmptySeed.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_seed_reads_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"s1","userId":"7","imageUrl":"https://host/a.png","extractedText":"hi","confidence":0.8,"createdAt":"2024-05-01T10:00:00Z"}}]"#
        )
        .unwrap();

        let scans = FileSeed::new(file.path()).load().await.unwrap();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].user_id, "7");
    }

    #[tokio::test]
    async fn test_file_seed_missing_file_is_io_error() {
        let err = FileSeed::new("/nonexistent/inkscan-seed.json")
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, InkscanError::Io(_)));
    }

    #[tokio::test]
    async fn test_file_seed_malformed_is_internal_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = FileSeed::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, InkscanError::Internal(_)));
    }
}
