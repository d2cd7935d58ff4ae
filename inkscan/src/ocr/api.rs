use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{InkscanError, Result};
use crate::models::ImageFile;

/// Body of a successful extraction. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlRequest<'a> {
    image_url: &'a str,
}

#[derive(Clone, Debug)]
pub struct OcrApiClient {
    client: Client,
    endpoint: String,
}

impl OcrApiClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| InkscanError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `POST <endpoint>` with the image as multipart field `image`.
    pub async fn ocr_file(&self, file: &ImageFile) -> Result<OcrResponse> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.part_name())
            .mime_str(&file.mime_type())?;
        let form = Form::new().part("image", part);

        debug!(endpoint = %self.endpoint, bytes = file.bytes.len(), "Submitting image to OCR");

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), "OCR file request rejected");
            return Err(InkscanError::Ocr("Failed to process image".to_string()));
        }

        resp.json::<OcrResponse>()
            .await
            .map_err(|_| InkscanError::InvalidResponse("Invalid OCR response".to_string()))
    }

    /// `POST <endpoint>/url` with `{ "imageUrl": ... }`.
    pub async fn ocr_url(&self, image_url: &str) -> Result<OcrResponse> {
        let target = format!("{}/url", self.endpoint);

        debug!(endpoint = %target, image_url = %image_url, "Submitting image URL to OCR");

        let resp = self
            .client
            .post(&target)
            .json(&UrlRequest { image_url })
            .send()
            .await?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), "OCR URL request rejected");
            return Err(InkscanError::Ocr("Failed to process image URL".to_string()));
        }

        resp.json::<OcrResponse>()
            .await
            .map_err(|_| InkscanError::InvalidResponse("Invalid OCR response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = OcrApiClient::new("http://localhost:8000/ocr/", 5).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/ocr");
    }

    #[test]
    fn test_url_request_wire_format() {
        let body = serde_json::to_value(UrlRequest {
            image_url: "https://host/img.png",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "imageUrl": "https://host/img.png" }));
    }

    #[test]
    fn test_response_fields_are_optional() {
        let resp: OcrResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.id.is_none());
        assert!(resp.text.is_none());
        assert!(resp.confidence.is_none());

        let resp: OcrResponse =
            serde_json::from_str(r#"{"id":"x1","text":"Hello","confidence":0.9}"#).unwrap();
        assert_eq!(resp.text.as_deref(), Some("Hello"));
        assert_eq!(resp.confidence, Some(0.9));
    }
}
