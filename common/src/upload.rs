//! アップロード画像の検証とエンコード
//!
//! ファイルサイズ検証（最大4MB）、Base64化、拡張子・MIMEタイプの導出

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// アップロード可能な最大サイズ（生バイト数）
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// MIMEタイプが判定できない場合の値
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// 拡張子 → MIMEタイプ
const EXTENSION_MIME_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
];

/// アップロード済み画像
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub extension: Option<String>,
    pub data_base64: String,
    pub size: usize,
}

impl UploadedImage {
    /// 生バイト列から作成
    ///
    /// # Errors
    /// 4MBを超える場合は `Error::Validation`
    pub fn from_bytes(file_name: &str, mime_type: &str, bytes: &[u8]) -> Result<Self> {
        validate_size(bytes.len())?;

        Ok(Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            extension: derive_extension(file_name, mime_type),
            data_base64: STANDARD.encode(bytes),
            size: bytes.len(),
        })
    }

    /// 最初の `.` より前のファイル名
    pub fn base_name(&self) -> &str {
        self.file_name.split('.').next().unwrap_or_default()
    }
}

/// サイズ検証
pub fn validate_size(size: usize) -> Result<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(Error::Validation(format!(
            "File is too large ({} bytes). Maximum is 4MB.",
            size
        )));
    }
    Ok(())
}

/// 拡張子を導出
///
/// ファイル名に `.` があれば最後の要素を小文字化、なければMIMEタイプのサブタイプ
pub fn derive_extension(file_name: &str, mime_type: &str) -> Option<String> {
    let parts: Vec<&str> = file_name.split('.').collect();
    if parts.len() > 1 {
        parts
            .last()
            .map(|ext| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
    } else {
        mime_type
            .split('/')
            .nth(1)
            .filter(|subtype| !subtype.is_empty())
            .map(|subtype| subtype.to_string())
    }
}

/// 拡張子からMIMEタイプを推定
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    let ext = extension.to_lowercase();
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
