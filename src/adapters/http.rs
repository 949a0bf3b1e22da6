use crate::domain::model::{OrderRequest, ProviderReply};
use crate::domain::ports::{CompletionClient, OrderGateway};
use crate::utils::error::{PanelError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

fn build_client(timeout_seconds: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| PanelError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// SMM 供應商下單客戶端
///
/// 不實作 Debug，避免金鑰被印出。
pub struct SmmProviderClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SmmProviderClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, api_key, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl OrderGateway for SmmProviderClient {
    async fn place_order(&self, request: &OrderRequest) -> Result<ProviderReply> {
        let service = request.service_id.to_string();
        let quantity = request.quantity.to_string();
        let form = [
            ("key", self.api_key.as_str()),
            ("action", "add"),
            ("service", service.as_str()),
            ("link", request.link.as_str()),
            ("quantity", quantity.as_str()),
        ];

        tracing::debug!("POST {} (action=add, service={})", self.endpoint, service);
        let response = self.client.post(&self.endpoint).form(&form).send().await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Provider response status: {}", status);

        Ok(ProviderReply::from_body(body))
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// OpenAI 相容的 chat completions 客戶端
pub struct OpenAiChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, api_key, model, DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.completions_url();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("POST {} (model={})", url, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(PanelError::provider(raw));
        }

        serde_json::from_str::<ChatResponse>(&raw)
            .ok()
            .and_then(|r| r.choices.into_iter().next())
            .and_then(|c| c.message.content)
            .ok_or_else(|| PanelError::provider(raw))
    }
}
