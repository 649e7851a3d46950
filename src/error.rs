use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockMetaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`stock-meta config --set-api-key YOUR_KEY` または環境変数 GEMINI_API_KEY で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("セッションファイルが不正: {0}")]
    InvalidSession(String),

    #[error("対話入力エラー: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] stock_meta_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<dialoguer::Error> for StockMetaError {
    fn from(err: dialoguer::Error) -> Self {
        StockMetaError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StockMetaError>;
