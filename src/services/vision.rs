use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::VisionSettings;
use crate::core::{ImageLabels, ImageTag};

/// Errors that can occur when calling the image analysis API
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Vision API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unauthorized: invalid vision API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Image analysis is not configured")]
    NotConfigured,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    #[serde(default)]
    tags_result: Option<TagList>,
    #[serde(default)]
    objects_result: Option<ObjectList>,
}

#[derive(Debug, Default, Deserialize)]
struct TagList {
    #[serde(default)]
    values: Vec<ImageTag>,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectList {
    #[serde(default)]
    values: Vec<DetectedObject>,
}

#[derive(Debug, Default, Deserialize)]
struct DetectedObject {
    #[serde(default)]
    tags: Vec<ImageTag>,
}

impl From<AnalyzeResponse> for ImageLabels {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            tags: response.tags_result.map(|t| t.values).unwrap_or_default(),
            objects: response
                .objects_result
                .map(|o| o.values.into_iter().map(|object| object.tags).collect())
                .unwrap_or_default(),
        }
    }
}

/// Azure AI Vision image analysis client
///
/// Sends raw image bytes and returns the tags and detected objects the
/// service recognised.
pub struct VisionClient {
    endpoint: String,
    key: String,
    api_version: String,
    client: Client,
}

impl VisionClient {
    pub fn new(
        endpoint: String,
        key: String,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            key,
            api_version,
            client,
        })
    }

    /// Build a client when both endpoint and key are configured
    pub fn from_settings(settings: &VisionSettings) -> Result<Option<Self>, VisionError> {
        if !settings.is_configured() {
            return Ok(None);
        }

        Self::new(
            settings.endpoint.trim().to_string(),
            settings.key.trim().to_string(),
            settings.api_version.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
        .map(Some)
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/computervision/imageanalysis:analyze?api-version={}&features={}&language=en&model-version=latest",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.api_version),
            urlencoding::encode("tags,objects"),
        )
    }

    /// Analyze an image and return its labels
    pub async fn analyze(&self, image: Vec<u8>) -> Result<ImageLabels, VisionError> {
        let url = self.analyze_url();
        tracing::debug!("Sending {} bytes to vision API", image.len());

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(VisionError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: {} - {}", status, message);
            return Err(VisionError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| VisionError::InvalidResponse(format!("Failed to parse analysis: {}", e)))?;

        let labels = ImageLabels::from(body);
        tracing::debug!(
            "Vision API returned {} tags and {} objects",
            labels.tags.len(),
            labels.objects.len()
        );
        Ok(labels)
    }
}
