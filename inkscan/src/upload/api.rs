use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::UploadConfig;
use crate::error::{InkscanError, Result};
use crate::models::ImageFile;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    secure_url: Option<String>,
}

impl UploadResponse {
    fn hosted_url(self) -> Option<String> {
        self.url
            .filter(|u| !u.is_empty())
            .or(self.secure_url.filter(|u| !u.is_empty()))
    }
}

/// Submits images to the asset host and returns their public URL.
#[derive(Clone, Debug)]
pub struct UploadClient {
    client: Client,
    upload_url: String,
    cloud_name: String,
    upload_preset: String,
}

impl UploadClient {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InkscanError::Internal(format!("Failed to create HTTP client: {e}")))?;

        let upload_url = format!(
            "{}/v1_1/{}/image/upload",
            config.base_url.trim_end_matches('/'),
            config.cloud_name
        );

        Ok(Self {
            client,
            upload_url,
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    pub async fn upload(&self, file: &ImageFile) -> Result<String> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.part_name())
            .mime_str(&file.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone());

        debug!(url = %self.upload_url, bytes = file.bytes.len(), "Uploading image");

        let resp = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            debug!(status = %resp.status(), "Upload rejected by asset host");
            return Err(InkscanError::Upload("Upload failed".to_string()));
        }

        resp.json::<UploadResponse>()
            .await
            .ok()
            .and_then(UploadResponse::hosted_url)
            .ok_or_else(|| InkscanError::InvalidResponse("Invalid upload response".to_string()))
    }
}
