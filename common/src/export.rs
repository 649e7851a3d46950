//! テキスト形式の一括エクスポート
//!
//! セッションの全結果を1つのプレーンテキストにまとめる。

use crate::session::Session;
use crate::types::{Notice, DEFAULT_DETAIL_LEVEL, PNG_MIME_TYPE};
use std::fmt::Write as _;

/// 結果がないときのメッセージ
pub const EMPTY_EXPORT_MESSAGE: &str = "No analysis results to download.";

/// ファイル未選択時のベース名
pub const DEFAULT_EXPORT_BASE_NAME: &str = "all_analysis_results";

const SECTION_RULE: &str = "========================================";
const ITEM_RULE: &str = "----------------------------------------";

/// エクスポート文書
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Ready(ExportDocument),
    Empty(Notice),
}

/// エクスポート文書を作成（結果がなければ通知のみ）
pub fn build_export(session: &Session) -> ExportOutcome {
    match render_export(session) {
        Some(content) => {
            let original = session.image.as_ref().map(|image| image.file_name.as_str());
            ExportOutcome::Ready(ExportDocument {
                file_name: export_file_name(original),
                content,
            })
        }
        None => ExportOutcome::Empty(Notice::info(EMPTY_EXPORT_MESSAGE)),
    }
}

/// エクスポート本文を生成
///
/// 結果が0件なら `None`
pub fn render_export(session: &Session) -> Option<String> {
    if session.results.is_empty() {
        return None;
    }

    let mut out = String::from("Image/Video Analysis Results:\n");

    match session.captured_config() {
        Some(config) => {
            if config.is_green_screen {
                out.push_str("Mode: Green Screen Video\n");
            } else if config.is_png_mode && session.uploaded_mime() == Some(PNG_MIME_TYPE) {
                out.push_str(
                    "Mode: PNG (Isolated on Transparent Background considerations applied)\n",
                );
            } else {
                out.push_str("Mode: Standard Image Analysis\n");
            }
            if config.is_anime_mode {
                out.push_str("Mode Consideration: Anime\n");
            }
            let _ = writeln!(out, "Analysis Detail Level: {}", config.detail_level);
        }
        None => {
            out.push_str("Mode: Standard Image Analysis (default)\n");
            let _ = writeln!(out, "Analysis Detail Level: {} (default)", DEFAULT_DETAIL_LEVEL);
        }
    }

    let _ = write!(out, "\n{}\n\n", SECTION_RULE);

    let extension = session
        .image
        .as_ref()
        .and_then(|image| image.extension.as_deref());

    for (index, item) in session.results.iter().enumerate() {
        let description = if item.description.is_empty() {
            "N/A".to_string()
        } else {
            item.description.clone()
        };
        let keywords = if item.keywords.is_empty() {
            "N/A".to_string()
        } else {
            item.keywords_joined()
        };

        let _ = writeln!(out, "Result {}:", index + 1);
        let _ = write!(out, "Subject Focus: {}", item.display_title(index));
        if let Some(ext) = extension {
            let _ = write!(out, " (.{})", ext);
        }
        out.push('\n');
        let _ = writeln!(out, "Description: {}", description);
        let _ = writeln!(out, "Keywords: {}", keywords);

        if let Some(ideas) = item.creative_content_ideas.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(out, "\nCreative Content Ideas:\n{}\n", ideas);
        }
        if let Some(expanded) = item.expanded_keywords_array.as_ref().filter(|v| !v.is_empty()) {
            let _ = write!(out, "\nExpanded Keywords: {}\n", expanded.join(", "));
        }

        let _ = write!(out, "\n{}\n\n", ITEM_RULE);
    }

    Some(out)
}

/// エクスポートファイル名（最初の `.` より前 + `_full_analysis.txt`）
pub fn export_file_name(original: Option<&str>) -> String {
    let base = original
        .map(|name| name.split('.').next().unwrap_or_default())
        .unwrap_or(DEFAULT_EXPORT_BASE_NAME);
    format!("{}_full_analysis.txt", base)
}
