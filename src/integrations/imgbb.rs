use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::Value;

use crate::{
    constants::{MAX_IMAGE_BYTES, UPLOAD_FAILED_MESSAGE},
    error::{AppError, Result},
};

/// Hosts player images on ImgBB so the AI judge can fetch them by URL.
#[derive(Clone, Debug)]
pub struct ImgbbClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl ImgbbClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build upload client: {}", e)))?;
        Ok(Self {
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && !self.base_url.trim().is_empty()
    }

    /// Uploads raw image bytes and returns the public URL.
    pub async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        validate_image(bytes, content_type)?;
        let Some(key) = &self.api_key else {
            tracing::warn!("image upload requested but IMGBB_API_KEY is not set");
            return Err(upload_failed());
        };

        let endpoint = format!("{}/1/upload", self.base_url.trim_end_matches('/'));
        let encoded = STANDARD.encode(bytes);
        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", key.as_str())])
            .form(&[("image", encoded.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("image upload request failed: {}", e);
                upload_failed()
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "image host rejected upload");
            return Err(upload_failed());
        }

        let payload: Value = response.json().await.map_err(|e| {
            tracing::warn!("image host returned unreadable body: {}", e);
            upload_failed()
        })?;
        let url = extract_image_url(&payload)?;
        tracing::info!(size = bytes.len(), %url, "image uploaded");
        Ok(url)
    }
}

pub fn validate_image(bytes: &[u8], content_type: &str) -> Result<()> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(AppError::BadRequest("Please select an image file".to_string()));
    }
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Image file is empty".to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest("Image must be less than 5MB".to_string()));
    }
    Ok(())
}

// `data.display_url`, falling back to `data.url`
fn extract_image_url(payload: &Value) -> Result<String> {
    if payload.get("success").and_then(Value::as_bool) == Some(false) {
        tracing::warn!("image host reported success=false");
        return Err(upload_failed());
    }
    let data = payload.get("data");
    ["display_url", "url"]
        .iter()
        .filter_map(|field| data.and_then(|d| d.get(*field)).and_then(Value::as_str))
        .find(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::warn!("image host response carried no URL");
            upload_failed()
        })
}

fn upload_failed() -> AppError {
    AppError::UploadFailed(UPLOAD_FAILED_MESSAGE.to_string())
}
