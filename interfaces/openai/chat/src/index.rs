use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system", content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user", content: content.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, `None` when missing or blank.
    pub fn first_content(&self) -> Option<&str> {
        let content = self.choices.first()?.message.content.as_deref()?.trim();
        (!content.is_empty()).then_some(content)
    }
}

pub struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    pub fn new(http: Client, api_key: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Single attempt; no retry on any failure.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ChatCompletionError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| ChatCompletionError::RequestSend { source })?;

        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|source| ChatCompletionError::ResponseRead { source })?;

        if !status.is_success() {
            return Err(ChatCompletionError::Status { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|source| ChatCompletionError::DeserializeResponseBody { source })
    }
}

#[derive(Debug, Error)]
pub enum ChatCompletionError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },

    #[error("Status {status}: {body}")]
    Status {
        status: StatusCode,
        body: String,
    },

    #[error("DeserializeResponseBody: {source}")]
    DeserializeResponseBody {
        source: serde_json::Error,
    },
}
