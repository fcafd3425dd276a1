//! OpenAI chat completions client

use super::{AiError, ChatCompletion, ChatMessage, CompletionRequest, MessageContent};
use crate::config::AiConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: OpenAiContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OpenAiContent {
    Text(String),
    Parts(Vec<OpenAiPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OpenAiPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        let content = match &msg.content {
            MessageContent::Text(text) => OpenAiContent::Text(text.clone()),
            MessageContent::TextWithImage { text, image_url } => OpenAiContent::Parts(vec![
                OpenAiPart::Text { text: text.clone() },
                OpenAiPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.clone(),
                    },
                },
            ]),
        };
        Self {
            role: msg.role.as_str(),
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
}

/// [`ChatCompletion`] over the OpenAI HTTP API
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig, api_key: SecretString) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AiError {
        let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
            Ok(response) => response.error.message,
            Err(_) => body.chars().take(200).collect(),
        };
        AiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model, json = request.json))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let body = OpenAiRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            max_tokens: request.max_tokens,
            response_format: request.json.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to OpenAI: {}", e);
                AiError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &text));
        }

        let parsed: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::InvalidResponse(format!("Malformed completion: {}", e)))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::InvalidResponse("API returned no choices".to_string()))?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Completion received"
        );
        Ok(content)
    }
}
