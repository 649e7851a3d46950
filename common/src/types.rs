//! 解析の型定義
//!
//! CLIと各フロントエンドで共有される型:
//! - AnalysisRequestConfig: 解析モードと詳細度（解析開始時に確定）
//! - AnalysisResultItem: モデル出力1件分（二次生成の結果もここに格納）
//! - FeatureKind: 二次生成の種類
//! - Notice: ユーザーに表示する一時メッセージ

use serde::{Deserialize, Serialize};

/// 詳細度のデフォルト値（スライダー初期値）
pub const DEFAULT_DETAIL_LEVEL: u8 = 3;

/// PNGルールが適用されるMIMEタイプ
pub const PNG_MIME_TYPE: &str = "image/png";

/// 解析設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequestConfig {
    pub detail_level: u8,         // 詳細度 1-5
    pub is_green_screen: bool,    // グリーンバック動画モード
    pub is_png_mode: bool,        // 透過PNGモード
    pub is_anime_mode: bool,      // アニメ調モード
}

impl Default for AnalysisRequestConfig {
    fn default() -> Self {
        Self {
            detail_level: DEFAULT_DETAIL_LEVEL,
            is_green_screen: false,
            is_png_mode: false,
            is_anime_mode: false,
        }
    }
}

impl AnalysisRequestConfig {
    /// 透過PNGルールを適用するか
    ///
    /// PNGモードかつグリーンバックではなく、アップロード画像が `image/png` の場合のみ
    pub fn png_rule_applies(&self, mime_type: Option<&str>) -> bool {
        self.is_png_mode && !self.is_green_screen && mime_type == Some(PNG_MIME_TYPE)
    }
}

/// 解析結果1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResultItem {
    pub subject_focus: String,
    pub description: String,
    pub keywords: Vec<String>,

    /// コンテンツアイデア（二次生成、生テキスト）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative_content_ideas: Option<String>,

    /// キーワード拡張（二次生成、生テキスト）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_keywords_text: Option<String>,

    /// キーワード拡張（カンマ区切りを分解したもの）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded_keywords_array: Option<Vec<String>>,
}

impl AnalysisResultItem {
    /// 表示用タイトル（subject_focusが空なら連番）
    pub fn display_title(&self, index: usize) -> String {
        if self.subject_focus.trim().is_empty() {
            format!("Analysis Result {}", index + 1)
        } else {
            self.subject_focus.clone()
        }
    }

    /// キーワードをカンマ区切りで連結
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

/// 二次生成の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKind {
    ContentIdeas,
    ExpandKeywords,
}

impl FeatureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKind::ContentIdeas => "content ideas",
            FeatureKind::ExpandKeywords => "keyword expansion",
        }
    }

    /// 失敗時に出力欄へ表示する文言
    pub fn failure_text(&self) -> &'static str {
        match self {
            FeatureKind::ContentIdeas => "Failed to generate content ideas.",
            FeatureKind::ExpandKeywords => "Failed to expand keywords.",
        }
    }
}

/// メッセージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Success,
}

/// ユーザー向けの一時メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }
}
