use nanoid::nanoid;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{InkscanError, Result};
use crate::models::ImageFile;

use super::api::{OcrApiClient, OcrResponse};

/// Confidence assumed when the service does not report one.
pub const DEFAULT_CONFIDENCE: f64 = 0.75;

const GENERATED_ID_LEN: usize = 9;
const GENERATED_ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Normalized extraction result.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    pub id: String,
    pub text: String,
    pub confidence: f64,
}

impl From<OcrResponse> for OcrOutput {
    fn from(resp: OcrResponse) -> Self {
        let id = match resp.id {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => generate_id(),
        };

        // A zero or non-finite score is treated the same as a missing one.
        let confidence = match resp.confidence {
            Some(c) if c.is_finite() && c != 0.0 => c.clamp(0.0, 1.0),
            _ => DEFAULT_CONFIDENCE,
        };

        Self {
            id,
            text: resp.text.unwrap_or_default(),
            confidence,
        }
    }
}

pub fn generate_id() -> String {
    nanoid!(GENERATED_ID_LEN, &GENERATED_ID_ALPHABET)
}

enum OcrBackend {
    Api { client: OcrApiClient },
    Unavailable { reason: String },
}

pub struct OcrProvider {
    backend: OcrBackend,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let backend = match config.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                let client = OcrApiClient::new(url, config.timeout_secs)?;
                info!(endpoint = %client.endpoint(), "OCR API backend initialized");
                OcrBackend::Api { client }
            }
            _ => {
                let reason = "OCR API URL not configured".to_string();
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Ok(Self { backend })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    /// Fails with a configuration error when no endpoint is set. Checked
    /// before any network call.
    pub fn ensure_available(&self) -> Result<()> {
        self.client().map(|_| ())
    }

    pub async fn ocr_file(&self, file: &ImageFile) -> Result<OcrOutput> {
        let client = self.client()?;
        client.ocr_file(file).await.map(OcrOutput::from)
    }

    pub async fn ocr_url(&self, image_url: &str) -> Result<OcrOutput> {
        let client = self.client()?;
        client.ocr_url(image_url).await.map(OcrOutput::from)
    }

    fn client(&self) -> Result<&OcrApiClient> {
        match &self.backend {
            OcrBackend::Api { client } => Ok(client),
            OcrBackend::Unavailable { reason } => Err(InkscanError::Config(reason.clone())),
        }
    }
}

impl Clone for OcrProvider {
    fn clone(&self) -> Self {
        match &self.backend {
            OcrBackend::Api { client } => Self {
                backend: OcrBackend::Api {
                    client: client.clone(),
                },
            },
            OcrBackend::Unavailable { reason } => Self {
                backend: OcrBackend::Unavailable {
                    reason: reason.clone(),
                },
            },
        }
    }
}
