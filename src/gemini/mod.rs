//! Gemini連携
//!
//! 解析・二次生成はすべて `ModelClient` 経由で呼び出す。
//! テストでは固定応答のスタブに差し替える。

mod client;
pub mod types;

pub use client::GeminiClient;

use async_trait::async_trait;
use stock_meta_common::{Result, UploadedImage};

/// JSON応答を要求する場合のMIMEタイプ
pub const JSON_MIME_TYPE: &str = "application/json";

/// インライン画像（Base64）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl From<&UploadedImage> for InlineImage {
    fn from(image: &UploadedImage) -> Self {
        Self {
            mime_type: image.mime_type.clone(),
            data: image.data_base64.clone(),
        }
    }
}

/// 生成リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
    pub response_mime_type: Option<String>,
}

impl GenerateRequest {
    /// テキストのみ（二次生成用）
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
            response_mime_type: None,
        }
    }

    /// 画像 + テキスト、JSON応答（一次解析用）
    pub fn multimodal(prompt: impl Into<String>, image: InlineImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        }
    }
}

/// 生成モデルのクライアント
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 応答テキストを返す（失敗は `Error::Transport`）
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
