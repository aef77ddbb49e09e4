use async_trait::async_trait;
use log::error;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::CompletionClient;
use crate::error::ChainError;
use crate::models::chat::{ChatMessage, ModelConfig};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Chat completion client. Endpoint and model come from the per-request
/// config when present, otherwise from the server defaults.
pub struct HttpCompletionClient {
    http: HttpClient,
    default_endpoint: String,
    default_model: String,
}

impl HttpCompletionClient {
    pub fn new(default_endpoint: String, default_model: String) -> Result<Self, ChainError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ChainError::Internal(format!("Failed to build completion client: {}", e))
            })?;

        Ok(Self {
            http,
            default_endpoint,
            default_model,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        config: &ModelConfig,
        messages: &[ChatMessage],
    ) -> Result<String, ChainError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ChainError::Internal("Completion requested without an API key".to_string())
            })?;
        let endpoint = config.api_endpoint.as_deref().unwrap_or(&self.default_endpoint);
        let model = config.model.as_deref().unwrap_or(&self.default_model);

        let req = CompletionRequest {
            model,
            messages,
            temperature: 0.7,
            max_tokens: 500,
        };

        let resp = self
            .http
            .post(endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // Unlike the other stages the provider's error body goes back to
            // the caller verbatim, so widget developers can see quota and
            // model errors.
            let body = resp.json::<Value>().await.unwrap_or_else(|_| {
                json!({ "error": { "message": format!("Completion request failed with status {}", status) } })
            });
            error!("Completion endpoint returned {}: {}", status, body);
            return Err(ChainError::Completion {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = resp.json::<CompletionResponse>().await?;
        parsed
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| ChainError::Internal("Completion response contained no choices".to_string()))
    }
}
