//! 画像解析（一次解析）
//!
//! 1回の解析 = プロンプト生成 → Gemini呼び出し → JSONパース → 正規化 → セッション格納

mod secondary;

pub use secondary::{failure_notice, generate_feature, FeatureOutput, NO_ADDITIONAL_KEYWORDS};

use crate::error::Result;
use crate::gemini::{GenerateRequest, InlineImage, ModelClient};
use crate::logging::preview;
use stock_meta_common::{
    build_analysis_prompt, normalize_results, parse_model_response, AnalysisRequestConfig, Notice,
    Session,
};
use tracing::{debug, info, warn};

/// 結果が0件のときのメッセージ
pub const EMPTY_RESULT_MESSAGE: &str =
    "No objects could be analyzed or the response format was unexpected.";

/// 解析の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// 結果件数
    Completed(usize),
    /// 0件（エラーではない）
    Empty(Notice),
}

/// 選択中の画像を解析し、結果をセッションに格納
///
/// 開始時に `config` を確定し、前回の結果は破棄する。
/// 失敗時は結果が空のまま `Err` を返す。
pub async fn analyze(
    client: &dyn ModelClient,
    session: &mut Session,
    config: AnalysisRequestConfig,
) -> Result<AnalysisOutcome> {
    let image = session.begin_analysis(config)?;
    let inline = InlineImage::from(image);
    info!(
        file = %image.file_name,
        mime = %image.mime_type,
        detail_level = config.detail_level,
        green_screen = config.is_green_screen,
        png = config.is_png_mode,
        anime = config.is_anime_mode,
        "解析開始"
    );

    let prompt = build_analysis_prompt(&config);
    debug!(prompt_chars = prompt.len(), "プロンプト生成");

    let response = client
        .generate(GenerateRequest::multimodal(prompt, inline))
        .await?;
    debug!(response_chars = response.len(), preview = %preview(&response), "応答受信");

    let parsed = parse_model_response(&response).inspect_err(|e| warn!("応答のパースに失敗: {}", e))?;
    let items = normalize_results(&parsed, &config, session.uploaded_mime());

    if items.is_empty() {
        warn!("解析結果が0件");
        session.complete_analysis(Vec::new());
        return Ok(AnalysisOutcome::Empty(Notice::info(EMPTY_RESULT_MESSAGE)));
    }

    let count = items.len();
    session.complete_analysis(items);
    info!(count, "解析完了");
    Ok(AnalysisOutcome::Completed(count))
}
