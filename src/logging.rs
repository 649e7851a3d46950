//! ログ初期化
//!
//! `RUST_LOG` があればそれに従う。なければ `info`（`--verbose` 時は `debug`）

use tracing_subscriber::EnvFilter;

/// プレビューとして出すテキストの最大文字数
pub const PREVIEW_CHARS: usize = 120;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // テストなどで二重初期化された場合は無視
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// ログ用の短いプレビュー（改行は空白に）
pub fn preview(text: &str) -> String {
    let flat: String = text.chars().take(PREVIEW_CHARS).collect();
    let flat = flat.replace(['\n', '\r'], " ");
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", flat)
    } else {
        flat
    }
}

/// APIキーを伏せ字に
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "***")
}
