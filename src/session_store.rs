//! セッションの保存・読み込み
//!
//! コマンドをまたいで解析結果を引き継ぐためのJSONファイル。
//! バージョンが異なるファイルは読み込まない。

use crate::error::{Result, StockMetaError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use stock_meta_common::Session;
use tracing::debug;

const SESSION_SUFFIX: &str = ".session.json";

/// 保存ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    /// バージョン（互換性チェック用）
    pub version: u32,
    pub saved_at: DateTime<Local>,
    pub session: Session,
}

impl SavedSession {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(session: Session) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            saved_at: Local::now(),
            session,
        }
    }
}

/// デフォルトの保存先（画像と同じフォルダの `<basename>.session.json`）
pub fn default_session_path(image_path: &Path) -> PathBuf {
    let file_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let base = file_name.split('.').next().unwrap_or_default();
    let base = if base.is_empty() { "analysis" } else { base };

    image_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}{}", base, SESSION_SUFFIX))
}

pub fn save(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &SavedSession::new(session.clone()))?;
    debug!(path = %path.display(), results = session.results.len(), "セッション保存");
    Ok(())
}

pub fn load(path: &Path) -> Result<SavedSession> {
    if !path.exists() {
        return Err(StockMetaError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let saved: SavedSession = serde_json::from_reader(reader)
        .map_err(|e| StockMetaError::InvalidSession(format!("{}: {}", path.display(), e)))?;

    // バージョンチェック
    if saved.version != SavedSession::CURRENT_VERSION {
        return Err(StockMetaError::InvalidSession(format!(
            "バージョン不一致 (file: {}, expected: {})",
            saved.version,
            SavedSession::CURRENT_VERSION
        )));
    }

    Ok(saved)
}
