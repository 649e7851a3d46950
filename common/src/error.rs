//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// ファイルサイズ超過・ファイル未選択など、ローカルで回復可能な入力エラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// モデルAPI呼び出しの失敗
    #[error("Transport error: {0}")]
    Transport(String),

    /// モデル応答がJSONとして解釈できない
    #[error("Malformed model response: {snippet}...")]
    MalformedModelResponse { snippet: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
