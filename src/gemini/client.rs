//! Gemini REST クライアント（generateContent）

use super::types::{
    Content, GeminiRequest, GeminiResponse, GenerationConfig, InlineData, Part,
};
use super::{GenerateRequest, ModelClient};
use crate::config::Config;
use crate::error::{Result as AppResult, StockMetaError};
use crate::logging::{preview, redact};
use async_trait::async_trait;
use std::time::Duration;
use stock_meta_common::{Error, Result};
use tracing::{debug, error};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockMetaError::Config(format!("HTTPクライアント作成失敗: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 設定から作成（APIキー未設定ならエラー）
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config.get_api_key()?;
        Self::new(
            api_key,
            config.model.clone(),
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn transport_error(&self, message: String) -> Error {
        let message = redact(&message, &self.api_key);
        error!("Gemini呼び出し失敗: {}", message);
        Error::Transport(message)
    }
}

/// 内部リクエストをワイヤ形式へ
pub fn build_request_body(request: GenerateRequest) -> GeminiRequest {
    let mut parts = Vec::new();
    if let Some(image) = request.image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type,
                data: image.data,
            },
        });
    }
    parts.push(Part::Text { text: request.prompt });

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: request
            .response_mime_type
            .map(|response_mime_type| GenerationConfig { response_mime_type }),
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            has_image = request.image.is_some(),
            "Gemini リクエスト送信"
        );

        let body = build_request_body(request);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(self.transport_error(format!(
                "API error {}: {}",
                status,
                preview(&text)
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(format!("invalid response body: {}", e)))?;

        match payload.text() {
            Some(text) => {
                debug!(response_chars = text.len(), preview = %preview(&text), "Gemini 応答受信");
                Ok(text)
            }
            None => {
                let reason = payload
                    .block_reason()
                    .map(|r| format!("blocked: {}", r))
                    .unwrap_or_else(|| "empty response".to_string());
                Err(self.transport_error(reason))
            }
        }
    }
}
