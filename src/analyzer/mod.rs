mod openai;
mod types;

pub use openai::OpenAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

use crate::error::Result;
use async_trait::async_trait;
use sentiment_common::{build_sentiment_prompt, SYSTEM_PROMPT};
use tracing::info;

/// チャット補完の呼び出し先
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    /// 最初の選択肢のテキストを返す
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// デコードパラメータ
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4".into(),
            temperature: 0.2,
            max_tokens: 150,
        }
    }
}

impl From<&crate::config::Config> for AnalysisOptions {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

pub struct SentimentAnalyzer<B> {
    backend: B,
    options: AnalysisOptions,
}

impl<B: SentimentBackend> SentimentAnalyzer<B> {
    pub fn new(backend: B, options: AnalysisOptions) -> Self {
        Self { backend, options }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// system + user の2メッセージ構成のリクエストを組み立てる
    pub fn build_request(&self, cleaned_comment: &str) -> ChatRequest {
        ChatRequest {
            model: self.options.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_sentiment_prompt(cleaned_comment)),
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }

    /// 前処理済みコメント1件を送信し、前後の空白を除いたレスポンスを返す
    pub async fn analyze_comment(&self, cleaned_comment: &str) -> Result<String> {
        let request = self.build_request(cleaned_comment);
        info!("Sending prompt to API: {}", request.messages[1].content);

        let response = self.backend.complete(&request).await?;
        info!("Received response from API: {}", response);

        Ok(response.trim().to_string())
    }
}
