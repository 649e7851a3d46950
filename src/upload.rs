//! 画像ファイルの読み込み
//!
//! サイズ検証 → MIMEタイプ判定（内容 → 拡張子 → octet-stream）→ Base64化

use crate::error::{Result, StockMetaError};
use std::path::Path;
use stock_meta_common::upload::{mime_from_extension, validate_size, FALLBACK_MIME_TYPE};
use stock_meta_common::UploadedImage;
use tracing::debug;

/// 画像ファイルを読み込んで `UploadedImage` を作成
///
/// # Errors
/// - ファイルがない: `FileNotFound`
/// - 4MB超: `Common(Validation)`（読み込み前にメタデータで判定）
pub fn load_image(path: &Path) -> Result<UploadedImage> {
    if !path.is_file() {
        return Err(StockMetaError::FileNotFound(path.display().to_string()));
    }

    let metadata = std::fs::metadata(path)?;
    validate_size(metadata.len() as usize)?;

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = detect_mime_type(&file_name, &bytes);
    debug!(file = %file_name, mime = %mime_type, size = bytes.len(), "画像読み込み");

    Ok(UploadedImage::from_bytes(&file_name, &mime_type, &bytes)?)
}

/// MIMEタイプ判定
pub fn detect_mime_type(file_name: &str, bytes: &[u8]) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_extension)
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}
