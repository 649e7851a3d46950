//! プロンプト生成モジュール
//!
//! CLIと各フロントエンドで共有されるプロンプト生成ロジック:
//! - DetailGuidance: 詳細度 1-5 ごとの説明文長・キーワード数の指示
//! - build_analysis_prompt: 画像解析（一次解析）用プロンプト
//! - build_feature_prompt: 二次生成（コンテンツアイデア/キーワード拡張）用プロンプト

use crate::types::{AnalysisRequestConfig, AnalysisResultItem, FeatureKind, DEFAULT_DETAIL_LEVEL};

/// 詳細度ごとの指示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailGuidance {
    pub level: u8,
    pub description_length: &'static str,
    pub keyword_count: &'static str,
}

const DETAIL_TABLE: [DetailGuidance; 5] = [
    DetailGuidance {
        level: 1,
        description_length: "5-8 words (very concise)",
        keyword_count: "10-15 (highly specific core keywords)",
    },
    DetailGuidance {
        level: 2,
        description_length: "7-12 words (concise)",
        keyword_count: "15-20 (specific keywords)",
    },
    DetailGuidance {
        level: 3,
        description_length: "8-15 words (standard)",
        keyword_count: "20-35 (relevant keywords)",
    },
    DetailGuidance {
        level: 4,
        description_length: "12-18 words (more detailed)",
        keyword_count: "30-40 (keywords, including some broader concepts)",
    },
    DetailGuidance {
        level: 5,
        description_length: "15-25 words (highly detailed)",
        keyword_count: "35-50 (keywords, including abstract concepts and related themes)",
    },
];

impl DetailGuidance {
    /// 詳細度から指示を取得（範囲外はレベル3）
    pub fn for_level(level: u8) -> &'static DetailGuidance {
        DETAIL_TABLE
            .iter()
            .find(|g| g.level == level)
            .unwrap_or(&DETAIL_TABLE[(DEFAULT_DETAIL_LEVEL - 1) as usize])
    }

    /// 説明文とキーワード数をまとめた1文
    pub fn instruction(&self) -> String {
        let description = self.description_length;
        let keywords = self.keyword_count;
        match self.level {
            1 => format!(
                "Provide a very concise description ({description}) and {keywords} highly specific core keywords."
            ),
            2 => format!(
                "Provide a concise description ({description}) and {keywords} specific keywords."
            ),
            4 => format!(
                "Provide a more detailed description ({description}), including subtle observations, and {keywords} keywords, including some broader concepts."
            ),
            5 => format!(
                "Provide a highly detailed and nuanced description ({description}), capturing subtle elements and potential interpretations, and {keywords} keywords, including abstract concepts and related themes."
            ),
            _ => format!(
                "Provide a standard description ({description}) and {keywords} relevant keywords."
            ),
        }
    }
}

/// アニメモード時に追加する指示
pub const ANIME_MODE_INSTRUCTION: &str = " If 'Anime Mode' is active, ensure the description prominently features 'Anime style' or related terms like 'anime character'.";

/// 出力形式の指示（全テンプレート共通）
const OUTPUT_FORMAT_INSTRUCTION: &str = r#"Output format: JSON array of objects. Each object: { "subject_focus": "Short identifier in English", "description": "Description in English matching the detail level requested", "keywords": ["keyword1 in English", "..."] }
Ensure all text output is in English."#;

/// 一次解析プロンプト生成
///
/// グリーンバック指定時は動画素材向けテンプレート、それ以外はストックフォト向けSEOテンプレート。
/// 副作用なし・失敗しない。
pub fn build_analysis_prompt(config: &AnalysisRequestConfig) -> String {
    let guidance = DetailGuidance::for_level(config.detail_level);
    let detail_instruction = guidance.instruction();
    let keyword_count = guidance.keyword_count;
    let anime_instruction = if config.is_anime_mode {
        ANIME_MODE_INSTRUCTION
    } else {
        ""
    };

    if config.is_green_screen {
        format!(
            r#"You are an expert in creating metadata for stock video footage, especially green screen footage.
Analyze the provided image (which represents a frame from a green screen video). If you can identify multiple distinct subjects, provide a separate analysis for each.
For each identified subject:
1.  **Description (Title):** {detail_instruction} Focus on actions, concepts, number of people, gender, ethnicity, and suitability for compositing. Ensure the description clearly indicates it's for "green screen" footage.{anime_instruction} Example (for standard detail): "Man in business suit pointing upwards, green screen video footage."
2.  **Keywords:** {keyword_count} keywords. Include "green screen," "chroma key," "video footage," "isolated," actions, concepts, and subject details.
{OUTPUT_FORMAT_INSTRUCTION}"#
        )
    } else {
        format!(
            r#"You are a professional image analyst specializing in creating SEO-optimized stock photo metadata.
Analyze the provided image. If you can identify multiple distinct objects or subjects, provide a separate analysis for each.
For each identified object/subject:
1.  **Description (Title):** {detail_instruction} Max 200 chars. {anime_instruction} Example (for standard detail): "Gray and white Maine Coon cat on red velvet sofa, looking curious."
2.  **Keywords:** {keyword_count} most relevant, specific, descriptive keywords, ordered by importance.
{OUTPUT_FORMAT_INSTRUCTION}"#
        )
    }
}

/// 二次生成プロンプト生成
///
/// # Arguments
/// * `kind` - コンテンツアイデア or キーワード拡張
/// * `item` - 対象の解析結果
/// * `config` - 解析時に確定した設定（現在のUI状態ではない）
pub fn build_feature_prompt(
    kind: FeatureKind,
    item: &AnalysisResultItem,
    config: Option<&AnalysisRequestConfig>,
) -> String {
    let keywords = item.keywords_joined();

    match kind {
        FeatureKind::ContentIdeas => {
            let mut context = format!(
                "Description: \"{}\"\nKeywords: {}",
                item.description, keywords
            );
            if let Some(config) = config {
                if config.is_green_screen {
                    context.push_str("\nContext: This is for green screen video footage.");
                }
                if config.is_anime_mode {
                    context.push_str("\nContext: This is Anime style artwork/content.");
                }
                context.push_str(&detail_level_line(config));
            }

            format!(
                "Based on the following image/video analysis:\n{context}\n\nGenerate 3-5 creative content ideas in English. These could be blog post titles, social media captions, or short story prompts. Present them as a numbered list."
            )
        }
        FeatureKind::ExpandKeywords => {
            let mut context = format!(
                "Primary keywords for an image/video: {}\nDescription: \"{}\"",
                keywords, item.description
            );
            if let Some(config) = config {
                if config.is_green_screen {
                    context.push_str("\nContext: This is for green screen video footage. Suggest keywords suitable for video compositing and general video themes.");
                }
                if config.is_anime_mode {
                    context.push_str("\nContext: This is Anime style artwork/content. Suggest keywords related to anime genres, styles, or character tropes if applicable.");
                }
                context.push_str(&detail_level_line(config));
            }

            format!(
                "Given the following:\n{context}\n\nSuggest 10-15 additional related or semantic keywords in English that would be useful for broader reach or conceptual understanding. Provide them as a comma-separated list."
            )
        }
    }
}

fn detail_level_line(config: &AnalysisRequestConfig) -> String {
    format!(
        "\n(Original analysis was generated with detail level: {})",
        config.detail_level
    )
}
