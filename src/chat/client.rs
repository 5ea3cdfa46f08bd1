//! HTTP client for the chat-completion endpoint, used by the prompt
//! analyzer and the creative prompt expander.

use crate::config::Config;
use crate::error::GenError;
use crate::util::truncate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Seam between the analyzer/expander and the network. Mocked in tests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the first choice's message content.
    async fn complete(&self, messages: &[ChatTurn], json_mode: bool) -> Result<String, GenError>;
}

pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    /// Build a client from config. Fails if no chat key is present.
    pub fn from_config(config: &Config) -> Result<Self, GenError> {
        let api_key = config
            .chat_api_key()
            .ok_or(GenError::MissingCredentials("chat"))?;
        Ok(Self::new(
            api_key,
            config.chat_api_base.clone(),
            config.chat_model.clone(),
        ))
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn complete(&self, messages: &[ChatTurn], json_mode: bool) -> Result<String, GenError> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                message: truncate(&text, 200),
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| GenError::Malformed(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GenError::EmptyResponse)
    }
}
