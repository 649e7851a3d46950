//! 二次生成（コンテンツアイデア・キーワード拡張）

use crate::error::{Result, StockMetaError};
use crate::gemini::{GenerateRequest, ModelClient};
use stock_meta_common::{build_feature_prompt, parse_keyword_list, FeatureKind, Notice, Session};
use tracing::{debug, info};

/// 拡張キーワードが空だったときの表示
pub const NO_ADDITIONAL_KEYWORDS: &str = "No additional keywords generated.";

/// 二次生成の出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOutput {
    pub kind: FeatureKind,
    pub index: usize,
    pub text: String,
    /// キーワード拡張で分解できたキーワード
    pub keywords: Option<Vec<String>>,
}

impl FeatureOutput {
    /// 出力欄に表示するテキスト
    pub fn display_text(&self) -> String {
        match self.kind {
            FeatureKind::ContentIdeas => self.text.clone(),
            FeatureKind::ExpandKeywords => match &self.keywords {
                Some(keywords) => keywords.join(", "),
                None => NO_ADDITIONAL_KEYWORDS.to_string(),
            },
        }
    }
}

/// 指定結果（0始まり）に対して二次生成を実行
///
/// 解析時に確定した設定を使う。失敗時は結果を変更しない。
pub async fn generate_feature(
    client: &dyn ModelClient,
    session: &mut Session,
    index: usize,
    kind: FeatureKind,
) -> Result<FeatureOutput> {
    let item = session.item(index)?;
    let prompt = build_feature_prompt(kind, item, session.captured_config());
    debug!(index, kind = kind.label(), prompt_chars = prompt.len(), "二次生成開始");

    let text = client.generate(GenerateRequest::text(prompt)).await?;

    session.apply_feature_output(index, kind, &text)?;
    let keywords = match kind {
        FeatureKind::ContentIdeas => None,
        FeatureKind::ExpandKeywords => Some(parse_keyword_list(&text)).filter(|k| !k.is_empty()),
    };
    info!(index, kind = kind.label(), "二次生成完了");

    Ok(FeatureOutput { kind, index, text, keywords })
}

/// 二次生成失敗時の通知
pub fn failure_notice(kind: FeatureKind, err: &StockMetaError) -> Notice {
    Notice::error(format!("Failed to get {}. Error: {}", kind.label(), err))
}
