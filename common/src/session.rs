//! 解析セッション
//!
//! 選択中の画像・解析開始時に確定した設定・結果リストを1つにまとめる。
//! フロントエンドは `&mut Session` を受け渡し、グローバル状態は持たない。

use crate::error::{Error, Result};
use crate::parser::parse_keyword_list;
use crate::types::{AnalysisRequestConfig, AnalysisResultItem, FeatureKind};
use crate::upload::UploadedImage;
use serde::{Deserialize, Serialize};

/// 画像未選択時のメッセージ
pub const NO_IMAGE_MESSAGE: &str = "Please select an image first.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub image: Option<UploadedImage>,
    pub config: Option<AnalysisRequestConfig>,
    pub results: Vec<AnalysisResultItem>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい画像を選択（結果と確定済み設定は破棄）
    pub fn select_file(&mut self, image: UploadedImage) {
        self.reset();
        self.image = Some(image);
    }

    /// すべてクリア
    pub fn reset(&mut self) {
        self.image = None;
        self.config = None;
        self.results.clear();
    }

    /// 解析開始: 設定を確定し、前回の結果を破棄
    ///
    /// # Errors
    /// 画像未選択（またはMIMEタイプ不明）の場合は `Error::Validation`
    pub fn begin_analysis(&mut self, config: AnalysisRequestConfig) -> Result<&UploadedImage> {
        let has_image = self
            .image
            .as_ref()
            .map(|image| !image.mime_type.is_empty())
            .unwrap_or(false);
        if !has_image {
            return Err(Error::Validation(NO_IMAGE_MESSAGE.to_string()));
        }

        self.results.clear();
        self.config = Some(config);
        self.image
            .as_ref()
            .ok_or_else(|| Error::Validation(NO_IMAGE_MESSAGE.to_string()))
    }

    /// 解析完了: 正規化済みの結果を格納
    pub fn complete_analysis(&mut self, items: Vec<AnalysisResultItem>) {
        self.results = items;
    }

    pub fn uploaded_mime(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.mime_type.as_str())
    }

    pub fn captured_config(&self) -> Option<&AnalysisRequestConfig> {
        self.config.as_ref()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// 結果を取得（0始まり）
    pub fn item(&self, index: usize) -> Result<&AnalysisResultItem> {
        self.results.get(index).ok_or_else(|| out_of_range(index, self.results.len()))
    }

    /// 二次生成の出力を結果に反映
    ///
    /// キーワード拡張は生テキストを保持し、分解したリストが空でなければ配列も保持する
    pub fn apply_feature_output(
        &mut self,
        index: usize,
        kind: FeatureKind,
        text: &str,
    ) -> Result<&AnalysisResultItem> {
        let len = self.results.len();
        let item = self
            .results
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))?;

        match kind {
            FeatureKind::ContentIdeas => {
                item.creative_content_ideas = Some(text.to_string());
            }
            FeatureKind::ExpandKeywords => {
                item.expanded_keywords_text = Some(text.to_string());
                let keywords = parse_keyword_list(text);
                if !keywords.is_empty() {
                    item.expanded_keywords_array = Some(keywords);
                }
            }
        }

        Ok(item)
    }
}

fn out_of_range(index: usize, len: usize) -> Error {
    Error::Validation(format!(
        "Result #{} does not exist ({} result(s) available).",
        index + 1,
        len
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str) -> UploadedImage {
        UploadedImage::from_bytes("cat.png", mime, b"png").unwrap()
    }

    fn analyzed_session() -> Session {
        let mut session = Session::new();
        session.select_file(image("image/png"));
        session
            .begin_analysis(AnalysisRequestConfig::default())
            .unwrap();
        session.complete_analysis(vec![AnalysisResultItem {
            subject_focus: "Cat".into(),
            description: "A cat".into(),
            keywords: vec!["cat".into()],
            ..Default::default()
        }]);
        session
    }

    #[test]
    fn test_begin_analysis_requires_image() {
        let mut session = Session::new();
        let result = session.begin_analysis(AnalysisRequestConfig::default());
        match result {
            Err(Error::Validation(msg)) => assert_eq!(msg, NO_IMAGE_MESSAGE),
            other => panic!("Expected Validation, got {:?}", other),
        }
        assert!(session.config.is_none());
    }

    #[test]
    fn test_begin_analysis_rejects_empty_mime() {
        let mut session = Session::new();
        session.select_file(image(""));
        assert!(session.begin_analysis(AnalysisRequestConfig::default()).is_err());
    }

    #[test]
    fn test_begin_analysis_captures_config_and_clears_results() {
        let mut session = analyzed_session();
        let config = AnalysisRequestConfig { detail_level: 5, is_anime_mode: true, ..Default::default() };

        session.begin_analysis(config).unwrap();

        assert!(session.results.is_empty());
        assert_eq!(session.captured_config(), Some(&config));
    }

    #[test]
    fn test_select_file_resets() {
        let mut session = analyzed_session();
        session.select_file(image("image/jpeg"));

        assert!(session.results.is_empty());
        assert!(session.config.is_none());
        assert_eq!(session.uploaded_mime(), Some("image/jpeg"));
    }

    #[test]
    fn test_item_out_of_range() {
        let session = analyzed_session();
        assert!(session.item(0).is_ok());
        assert!(matches!(session.item(1), Err(Error::Validation(_))));
    }

    #[test]
    fn test_apply_content_ideas() {
        let mut session = analyzed_session();
        session
            .apply_feature_output(0, FeatureKind::ContentIdeas, "1. Poster\n2. Blog header")
            .unwrap();

        let item = session.item(0).unwrap();
        assert_eq!(item.creative_content_ideas.as_deref(), Some("1. Poster\n2. Blog header"));
        assert!(item.expanded_keywords_text.is_none());
    }

    #[test]
    fn test_apply_expand_keywords() {
        let mut session = analyzed_session();
        session
            .apply_feature_output(0, FeatureKind::ExpandKeywords, "kitten, pet , feline,")
            .unwrap();

        let item = session.item(0).unwrap();
        assert_eq!(item.expanded_keywords_text.as_deref(), Some("kitten, pet , feline,"));
        assert_eq!(
            item.expanded_keywords_array.as_deref(),
            Some(&["kitten".to_string(), "pet".to_string(), "feline".to_string()][..])
        );
    }

    #[test]
    fn test_apply_expand_keywords_empty_list_keeps_text_only() {
        let mut session = analyzed_session();
        session
            .apply_feature_output(0, FeatureKind::ExpandKeywords, " , ")
            .unwrap();

        let item = session.item(0).unwrap();
        assert_eq!(item.expanded_keywords_text.as_deref(), Some(" , "));
        assert!(item.expanded_keywords_array.is_none());
    }

    #[test]
    fn test_apply_feature_out_of_range() {
        let mut session = analyzed_session();
        let result = session.apply_feature_output(3, FeatureKind::ContentIdeas, "x");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_session_json_roundtrip_keeps_config() {
        let session = analyzed_session();
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
