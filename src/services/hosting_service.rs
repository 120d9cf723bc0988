use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::HostingConfig;
use crate::error::{AppError, Result};

const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// The hosting stage as an injectable collaborator. Deployments without
/// credentials simply have no implementation wired in, and tests substitute
/// their own.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload an image buffer, returning its publicly reachable URL.
    async fn upload(&self, image_bytes: &[u8], filename: &str) -> Result<String>;
}

/// Uploads to a Cloudinary-compatible endpoint and returns the `secure_url`
/// from the response verbatim.
pub struct CloudinaryHost {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    api_base: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct UploadErrorResponse {
    error: UploadErrorDetail,
}

#[derive(Deserialize)]
struct UploadErrorDetail {
    message: String,
}

impl CloudinaryHost {
    pub fn new(config: &HostingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build upload client: {}", e)))?;

        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/v1_1/{}/image/upload", self.api_base, self.cloud_name)
    }

    /// Request signature: the signed params (here only `timestamp`) in
    /// alphabetical order, with the API secret appended, SHA-256 hex digest.
    fn signature(&self, timestamp: u64) -> String {
        let payload = format!("timestamp={}{}", timestamp, self.api_secret);
        hex::encode(Sha256::digest(payload.as_bytes()))
    }
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, image_bytes: &[u8], filename: &str) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let file_part = reqwest::multipart::Part::bytes(image_bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(super::generator_service::QR_MIME_TYPE)
            .map_err(|e| AppError::Internal(format!("invalid upload part: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", self.signature(timestamp));

        let response = self.client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<UploadErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("upload endpoint returned status {}", status));
            return Err(AppError::Upload(message));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("invalid upload response: {}", e)))?;

        Ok(body.secure_url)
    }
}
