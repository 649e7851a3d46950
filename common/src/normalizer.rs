//! 解析結果の正規化
//!
//! パース済みJSONを結果リストに変換し、以下の順でルールを適用する:
//! 1. 透過PNGルール（PNGモード・非グリーンバック・`image/png` のときのみ）
//! 2. アニメルール（アニメモードのときのみ）
//! 3. 末尾ピリオド除去（全件）
//!
//! 1・2で付与された末尾ピリオドは3で除去されるため、保存される説明文はピリオドで終わらない。

use crate::parser::parse_keyword_list;
use crate::types::{AnalysisRequestConfig, AnalysisResultItem};
use serde_json::{Map, Value};

/// 透過PNG用フレーズ（キーワード・説明文の両方に使用）
pub const TRANSPARENT_PHRASE: &str = "isolated on transparent background";

/// 説明文が空の場合の透過PNG用説明文
pub const PNG_FALLBACK_DESCRIPTION: &str = "Object isolated on transparent background.";

/// アニメ関連語（いずれかを含めば付与しない）
pub const ANIME_TERMS: &[&str] = &[
    "anime style",
    "anime character",
    "anime artwork",
    "anime art",
    "anime illustration",
];

/// アニメモードで付与するフレーズ
pub const ANIME_PHRASE: &str = "Anime style";

/// パース済みJSONを正規化済みの結果リストに変換
///
/// 配列でない場合は空（「結果なし」扱い）
///
/// # Arguments
/// * `value` - モデル応答をパースしたJSON
/// * `config` - 解析開始時に確定した設定
/// * `mime_type` - アップロード画像のMIMEタイプ
pub fn normalize_results(
    value: &Value,
    config: &AnalysisRequestConfig,
    mime_type: Option<&str>,
) -> Vec<AnalysisResultItem> {
    let mut items = items_from_value(value);
    for item in &mut items {
        normalize_item(item, config, mime_type);
    }
    items
}

/// 1件にルールを順に適用
pub fn normalize_item(
    item: &mut AnalysisResultItem,
    config: &AnalysisRequestConfig,
    mime_type: Option<&str>,
) {
    if config.png_rule_applies(mime_type) {
        apply_png_rule(item);
    }
    if config.is_anime_mode {
        apply_anime_rule(item);
    }
    item.description = strip_trailing_period(&item.description).to_string();
}

/// JSON配列を結果リストへ（配列以外は空）
///
/// 要素はゆるく読み取る: オブジェクト以外は空の結果、文字列以外の値は文字列化
pub fn items_from_value(value: &Value) -> Vec<AnalysisResultItem> {
    match value.as_array() {
        Some(array) => array.iter().map(item_from_value).collect(),
        None => Vec::new(),
    }
}

fn item_from_value(value: &Value) -> AnalysisResultItem {
    let Some(map) = value.as_object() else {
        return AnalysisResultItem::default();
    };

    AnalysisResultItem {
        subject_focus: get_string(map, "subject_focus").unwrap_or_default(),
        description: get_string(map, "description").unwrap_or_default(),
        keywords: get_keywords(map),
        ..Default::default()
    }
}

fn get_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    if value.is_null() {
        return None;
    }
    Some(value.to_string())
}

fn get_keywords(map: &Map<String, Value>) -> Vec<String> {
    match map.get("keywords") {
        Some(Value::Array(values)) => values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .collect(),
        Some(Value::String(text)) => parse_keyword_list(text),
        _ => Vec::new(),
    }
}

/// 透過PNGルール
///
/// キーワードにフレーズがなければ追加し、説明文にフレーズがなければ末尾に付与する。
/// 何度適用しても結果は変わらない。
pub fn apply_png_rule(item: &mut AnalysisResultItem) {
    let has_keyword = item
        .keywords
        .iter()
        .any(|kw| kw.to_lowercase() == TRANSPARENT_PHRASE);
    if !has_keyword {
        item.keywords.push(TRANSPARENT_PHRASE.to_string());
    }

    if item.description.is_empty() {
        item.description = PNG_FALLBACK_DESCRIPTION.to_string();
    } else if !contains_ignore_case(&item.description, TRANSPARENT_PHRASE) {
        let base = strip_one_trailing_period(item.description.trim()).trim();
        let updated = if base.is_empty() {
            format!("{}.", TRANSPARENT_PHRASE)
        } else {
            format!("{} {}.", base, TRANSPARENT_PHRASE)
        };
        item.description = updated;
    }
}

/// アニメルール
///
/// アニメ関連語がなければ ", Anime style." を付与（`,` `;` で終わる場合は空白のみ）。
/// 関連語があり末尾ピリオドがなければピリオドを付ける。
pub fn apply_anime_rule(item: &mut AnalysisResultItem) {
    let lower = item.description.to_lowercase();
    let has_anime_term = ANIME_TERMS.iter().any(|term| lower.contains(term));

    if !has_anime_term {
        let base = strip_one_trailing_period(item.description.trim()).trim();
        let updated = if base.is_empty() {
            format!("Subject in {}.", ANIME_PHRASE)
        } else {
            let separator = if base.ends_with(',') || base.ends_with(';') {
                " "
            } else {
                ", "
            };
            format!("{}{}{}.", base, separator, ANIME_PHRASE)
        };
        item.description = updated;
    } else {
        let trimmed = item.description.trim();
        if !trimmed.is_empty() && !trimmed.ends_with('.') {
            let updated = format!("{}.", trimmed);
            item.description = updated;
        }
    }
}

/// 末尾ピリオド除去（右側の空白を除去してから、ピリオドを1つだけ外す）
pub fn strip_trailing_period(description: &str) -> &str {
    let trimmed = description.trim_end();
    trimmed.strip_suffix('.').unwrap_or(trimmed)
}

/// 末尾のピリオドを1つだけ外す（空白は触らない）
pub fn strip_one_trailing_period(text: &str) -> &str {
    text.strip_suffix('.').unwrap_or(text)
}

/// 大文字小文字を無視した部分一致
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn item(description: &str, keywords: &[&str]) -> AnalysisResultItem {
        AnalysisResultItem {
            subject_focus: "Subject".to_string(),
            description: description.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    fn png_config() -> AnalysisRequestConfig {
        AnalysisRequestConfig { is_png_mode: true, ..Default::default() }
    }

    // =============================================
    // items_from_value テスト
    // =============================================

    #[test]
    fn test_items_from_non_array_is_empty() {
        assert!(items_from_value(&json!({"subject_focus": "Cat"})).is_empty());
        assert!(items_from_value(&Value::Null).is_empty());
        assert!(items_from_value(&json!("text")).is_empty());
    }

    #[test]
    fn test_items_from_array_lenient() {
        let value = json!([
            {"subject_focus": "Cat", "description": "A cat.", "keywords": ["cat", 7, null]},
            "not an object",
            {"subject_focus": 3, "keywords": "red, blue"}
        ]);

        let items = items_from_value(&value);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].keywords, vec!["cat", "7"]);
        assert_eq!(items[1], AnalysisResultItem::default());
        assert_eq!(items[2].subject_focus, "3");
        assert_eq!(items[2].keywords, vec!["red", "blue"]);
    }

    // =============================================
    // 透過PNGルール テスト
    // =============================================

    #[test]
    fn test_png_rule_example() {
        let value = json!([{"subject_focus": "Cat", "description": "A cat.", "keywords": ["cat"]}]);
        let items = normalize_results(&value, &png_config(), Some("image/png"));

        assert_eq!(items[0].keywords, vec!["cat", TRANSPARENT_PHRASE]);
        assert_eq!(items[0].description, "A cat isolated on transparent background");
    }

    #[test]
    fn test_png_rule_noop_for_jpeg() {
        let value = json!([{"description": "A cat.", "keywords": ["cat"]}]);
        let items = normalize_results(&value, &png_config(), Some("image/jpeg"));

        assert_eq!(items[0].keywords, vec!["cat"]);
        assert_eq!(items[0].description, "A cat");
    }

    #[test]
    fn test_png_rule_noop_for_green_screen() {
        let config = AnalysisRequestConfig { is_green_screen: true, ..png_config() };
        let value = json!([{"description": "A cat.", "keywords": ["cat"]}]);
        let items = normalize_results(&value, &config, Some("image/png"));

        assert_eq!(items[0].keywords, vec!["cat"]);
    }

    #[test]
    fn test_png_rule_idempotent() {
        let mut once = item("A cat.", &["cat"]);
        apply_png_rule(&mut once);

        let mut twice = once.clone();
        apply_png_rule(&mut twice);

        assert_eq!(once, twice);
        let count = twice
            .keywords
            .iter()
            .filter(|k| k.as_str() == TRANSPARENT_PHRASE)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_png_rule_keyword_case_insensitive() {
        let mut target = item("Lamp Isolated On Transparent Background", &["Isolated on Transparent Background"]);
        apply_png_rule(&mut target);

        assert_eq!(target.keywords.len(), 1);
        assert_eq!(target.description, "Lamp Isolated On Transparent Background");
    }

    #[test]
    fn test_png_rule_empty_description() {
        let mut target = item("", &[]);
        apply_png_rule(&mut target);

        assert_eq!(target.description, PNG_FALLBACK_DESCRIPTION);
        assert_eq!(target.keywords, vec![TRANSPARENT_PHRASE]);
    }

    #[test]
    fn test_png_rule_whitespace_description() {
        let mut target = item("   ", &["x"]);
        apply_png_rule(&mut target);
        assert_eq!(target.description, "isolated on transparent background.");
    }

    // =============================================
    // アニメルール テスト
    // =============================================

    #[test]
    fn test_anime_rule_example() {
        let mut target = item("A fox in a forest.", &["fox"]);
        apply_anime_rule(&mut target);
        assert!(target.description.ends_with("Anime style."));
        assert_eq!(target.description, "A fox in a forest, Anime style.");

        assert_eq!(strip_trailing_period(&target.description), "A fox in a forest, Anime style");
    }

    #[test]
    fn test_anime_rule_full_pipeline() {
        let config = AnalysisRequestConfig { is_anime_mode: true, ..Default::default() };
        let value = json!([{"description": "A fox in a forest.", "keywords": ["fox"]}]);
        let items = normalize_results(&value, &config, Some("image/jpeg"));

        assert_eq!(items[0].description, "A fox in a forest, Anime style");
    }

    #[test]
    fn test_anime_rule_comma_or_semicolon() {
        let mut comma = item("Girl with umbrella,", &[]);
        apply_anime_rule(&mut comma);
        assert_eq!(comma.description, "Girl with umbrella, Anime style.");

        let mut semicolon = item("Girl with umbrella;", &[]);
        apply_anime_rule(&mut semicolon);
        assert_eq!(semicolon.description, "Girl with umbrella; Anime style.");
    }

    #[test]
    fn test_anime_rule_empty_description() {
        let mut target = item("", &[]);
        apply_anime_rule(&mut target);
        assert_eq!(target.description, "Subject in Anime style.");
    }

    #[test]
    fn test_anime_rule_term_present_adds_period() {
        let mut target = item("Hero in ANIME ARTWORK pose  ", &[]);
        apply_anime_rule(&mut target);
        assert_eq!(target.description, "Hero in ANIME ARTWORK pose.");
    }

    #[test]
    fn test_anime_rule_term_present_with_period_untouched() {
        let mut target = item("Anime character waving.", &[]);
        apply_anime_rule(&mut target);
        assert_eq!(target.description, "Anime character waving.");
    }

    // =============================================
    // ルール順序・末尾ピリオド テスト
    // =============================================

    #[test]
    fn test_png_then_anime_then_strip() {
        let config = AnalysisRequestConfig {
            is_png_mode: true,
            is_anime_mode: true,
            ..Default::default()
        };
        let value = json!([{"description": "A robot.", "keywords": []}]);
        let items = normalize_results(&value, &config, Some("image/png"));

        assert_eq!(
            items[0].description,
            "A robot isolated on transparent background, Anime style"
        );
    }

    #[test]
    fn test_trailing_period_applied_always() {
        let value = json!([
            {"description": "Sunset over sea.  "},
            {"description": "No period"},
            {"description": "Ellipsis..."}
        ]);
        let items = normalize_results(&value, &AnalysisRequestConfig::default(), None);

        assert_eq!(items[0].description, "Sunset over sea");
        assert_eq!(items[1].description, "No period");
        assert_eq!(items[2].description, "Ellipsis..");
    }

    #[test]
    fn test_strip_one_trailing_period() {
        assert_eq!(strip_one_trailing_period("abc."), "abc");
        assert_eq!(strip_one_trailing_period("abc. "), "abc. ");
        assert_eq!(strip_one_trailing_period(""), "");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Cup ISOLATED on transparent BACKGROUND", TRANSPARENT_PHRASE));
        assert!(!contains_ignore_case("Cup on white", TRANSPARENT_PHRASE));
    }
}
