//! HTTP client for the image-generation endpoint.
//!
//! The endpoint accepts image URLs (including data URLs) inline in the
//! prompt text, so the reference image is prepended to the prompt rather
//! than carried in a separate field.

use crate::config::Config;
use crate::error::GenError;
use crate::gen::ratio::AspectRatio;
use crate::util::truncate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
    quality: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    #[allow(dead_code)]
    created: Option<i64>,
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: String,
}

/// Seam between the orchestrator and the network. Mocked in tests.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Generate one image and return its URL. An aborted request must
    /// surface as [`GenError::Aborted`], never as a generic failure.
    async fn generate(
        &self,
        prompt: &str,
        reference: &str,
        ratio: AspectRatio,
        cancel: &CancellationToken,
    ) -> Result<String, GenError>;
}

pub struct ImageClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ImageClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Build a client from config. Fails if no image key is present.
    pub fn from_config(config: &Config) -> Result<Self, GenError> {
        let api_key = config
            .image_api_key()
            .ok_or(GenError::MissingCredentials("image"))?;
        Ok(Self::new(
            api_key,
            config.image_api_base.clone(),
            config.image_model.clone(),
        ))
    }
}

#[async_trait]
impl ImageBackend for ImageClient {
    async fn generate(
        &self,
        prompt: &str,
        reference: &str,
        ratio: AspectRatio,
        cancel: &CancellationToken,
    ) -> Result<String, GenError> {
        let full_prompt = if reference.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n{}", reference, prompt)
        };

        let request = ImageRequest {
            model: &self.model,
            prompt: &full_prompt,
            n: 1,
            size: ratio.provider_token(),
            response_format: "url",
            quality: "1k",
        };

        let url = format!("{}/v1/images/generations", self.base_url);
        let send = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send();

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(GenError::Aborted),
            result = send => result?,
        };

        let status = response.status();
        let text = tokio::select! {
            _ = cancel.cancelled() => return Err(GenError::Aborted),
            result = response.text() => result?,
        };

        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                message: truncate(&text, 200),
            });
        }

        let parsed: ImageResponse =
            serde_json::from_str(&text).map_err(|e| GenError::Malformed(e.to_string()))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or(GenError::EmptyResponse)
    }
}
