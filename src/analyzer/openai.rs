//! OpenAI互換 chat/completions クライアント
//!
//! リトライ・バックオフは行わない（失敗はそのまま呼び出し元へ）

use super::types::{ApiErrorBody, ChatRequest, ChatResponse};
use super::SentimentBackend;
use crate::config::Config;
use crate::error::{SentimentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            api_base: api_base.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.api_base.clone(),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl SentimentBackend for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SentimentError::ApiCall(format!(
                "status {}: {}",
                status.as_u16(),
                message
            )));
        }

        let payload: ChatResponse = response.json().await?;
        debug!("choices: {}", payload.choices.len());

        payload
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| SentimentError::ApiParse("レスポンスにテキストがありません".into()))
    }
}
