//! モデル応答パーサー
//!
//! Gemini応答テキストからコードフェンスを外し、JSONとして解釈する。
//! JSONの推測・修復は行わない。

use crate::error::{Error, Result};
use regex::Regex;
use serde_json::Value;

/// エラー時に保持する応答テキストの最大文字数
pub const SNIPPET_CHARS: usize = 100;

/// 応答全体がコードフェンスで囲まれていれば中身を取り出す
///
/// 言語タグ（```json など）は任意。フェンスが全体を囲んでいない場合は入力をそのまま返す。
///
/// # Examples
/// ```
/// use stock_meta_common::unwrap_code_fence;
///
/// assert_eq!(unwrap_code_fence("```json\n[1, 2]\n```"), "[1, 2]");
/// assert_eq!(unwrap_code_fence("[1, 2]"), "[1, 2]");
/// ```
pub fn unwrap_code_fence(response: &str) -> &str {
    lazy_static::lazy_static! {
        static ref FENCE_RE: Regex = Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").unwrap();
    }

    FENCE_RE
        .captures(response.trim())
        .and_then(|caps| caps.get(2))
        .map(|inner| inner.as_str().trim())
        .filter(|inner| !inner.is_empty())
        .unwrap_or(response)
}

/// 応答テキストをJSONとしてパース
///
/// # Returns
/// * `Ok(Value)` - パース成功（配列かどうかは呼び出し側で判定）
/// * `Err(Error::MalformedModelResponse)` - 先頭100文字のスニペット付き
pub fn parse_model_response(response: &str) -> Result<Value> {
    let body = unwrap_code_fence(response);
    serde_json::from_str(body).map_err(|_| Error::MalformedModelResponse {
        snippet: snippet(body, SNIPPET_CHARS),
    })
}

/// カンマ区切りのキーワード列を分解（前後空白除去・空要素除外）
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(|kw| kw.trim())
        .filter(|kw| !kw.is_empty())
        .map(|kw| kw.to_string())
        .collect()
}

/// 先頭 `max_chars` 文字（文字境界で切る）
pub fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =============================================
    // unwrap_code_fence テスト
    // =============================================

    #[test]
    fn test_unwrap_fence_with_language_tag() {
        let response = "```json\n[{\"subject_focus\": \"Cat\"}]\n```";
        assert_eq!(unwrap_code_fence(response), "[{\"subject_focus\": \"Cat\"}]");
    }

    #[test]
    fn test_unwrap_fence_without_language_tag() {
        let response = "```\n[1, 2, 3]\n```";
        assert_eq!(unwrap_code_fence(response), "[1, 2, 3]");
    }

    #[test]
    fn test_unwrap_fence_single_line() {
        assert_eq!(unwrap_code_fence("```[true]```"), "[true]");
    }

    #[test]
    fn test_unwrap_fence_trailing_newline() {
        let response = "```json\n{\"a\": 1}\n```\n";
        assert_eq!(unwrap_code_fence(response), "{\"a\": 1}");
    }

    #[test]
    fn test_unwrap_plain_text_verbatim() {
        let response = "  [1, 2]  ";
        assert_eq!(unwrap_code_fence(response), "  [1, 2]  ");
    }

    #[test]
    fn test_unwrap_fence_not_spanning_whole_text() {
        let response = "Here you go:\n```json\n[1]\n```";
        assert_eq!(unwrap_code_fence(response), response);
    }

    #[test]
    fn test_unwrap_empty_fence_is_verbatim() {
        assert_eq!(unwrap_code_fence("``````"), "``````");
    }

    // =============================================
    // parse_model_response テスト
    // =============================================

    #[test]
    fn test_parse_fenced_equals_plain() {
        let plain = r#"[{"subject_focus": "Cat", "description": "A cat", "keywords": ["cat"]}]"#;
        let tagged = format!("```json\n{}\n```", plain);
        let untagged = format!("```\n{}\n```", plain);

        let expected = parse_model_response(plain).unwrap();
        assert_eq!(parse_model_response(&tagged).unwrap(), expected);
        assert_eq!(parse_model_response(&untagged).unwrap(), expected);
        assert_eq!(expected[0]["subject_focus"], json!("Cat"));
    }

    #[test]
    fn test_parse_not_json_is_malformed() {
        let result = parse_model_response("not json");
        match result {
            Err(Error::MalformedModelResponse { snippet }) => assert_eq!(snippet, "not json"),
            other => panic!("Expected MalformedModelResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_snippet_truncated() {
        let long = format!("{{ broken {}", "x".repeat(500));
        match parse_model_response(&long) {
            Err(Error::MalformedModelResponse { snippet }) => {
                assert_eq!(snippet.chars().count(), SNIPPET_CHARS);
                assert!(long.starts_with(&snippet));
            }
            other => panic!("Expected MalformedModelResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_object_is_ok() {
        // 配列かどうかの判定は正規化側
        let value = parse_model_response(r#"{"subject_focus": "Cat"}"#).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn test_snippet_multibyte_boundary() {
        assert_eq!(snippet("ねこねこ", 2), "ねこ");
    }

    // =============================================
    // parse_keyword_list テスト
    // =============================================

    #[test]
    fn test_parse_keyword_list() {
        let keywords = parse_keyword_list(" fox , wildlife,, autumn leaves ,  ");
        assert_eq!(keywords, vec!["fox", "wildlife", "autumn leaves"]);
    }

    #[test]
    fn test_parse_keyword_list_empty() {
        assert!(parse_keyword_list(" , ,").is_empty());
        assert!(parse_keyword_list("").is_empty());
    }
}
