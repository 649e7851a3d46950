//! 対話モード
//!
//! 解析結果に対してアイデア生成・キーワード拡張・コピー・書き出し・再解析を行う

use crate::analyzer::{self, failure_notice, AnalysisOutcome};
use crate::error::{Result, StockMetaError};
use crate::export::{write_export, WriteOutcome};
use crate::gemini::ModelClient;
use crate::render::{self, CopyTarget};
use crate::session_store;
use crate::upload::load_image;
use dialoguer::{Input, MultiSelect, Select};
use std::path::{Path, PathBuf};
use stock_meta_common::types::DEFAULT_DETAIL_LEVEL;
use stock_meta_common::{AnalysisRequestConfig, FeatureKind, Notice, Session};
use tracing::warn;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowResults,
    ContentIdeas,
    ExpandKeywords,
    CopyDescription,
    CopyKeywords,
    DownloadAll,
    Reanalyze,
    SelectFile,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ShowResults,
        MenuAction::ContentIdeas,
        MenuAction::ExpandKeywords,
        MenuAction::CopyDescription,
        MenuAction::CopyKeywords,
        MenuAction::DownloadAll,
        MenuAction::Reanalyze,
        MenuAction::SelectFile,
        MenuAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::ShowResults => "結果を表示",
            MenuAction::ContentIdeas => "✨ コンテンツアイデアを生成",
            MenuAction::ExpandKeywords => "✨ キーワードを拡張",
            MenuAction::CopyDescription => "説明文をコピー用に表示",
            MenuAction::CopyKeywords => "キーワードをコピー用に表示",
            MenuAction::DownloadAll => "全結果をテキストに書き出し",
            MenuAction::Reanalyze => "モードを変えて再解析",
            MenuAction::SelectFile => "別の画像を選択",
            MenuAction::Quit => "保存して終了",
        }
    }

    /// 結果が必要な操作か
    pub fn requires_results(&self) -> bool {
        matches!(
            self,
            MenuAction::ContentIdeas
                | MenuAction::ExpandKeywords
                | MenuAction::CopyDescription
                | MenuAction::CopyKeywords
        )
    }
}

/// モード選択肢（MultiSelectの並び順）
pub const MODE_LABELS: [&str; 3] = ["グリーンバック動画", "透過PNG", "アニメ調"];

/// 詳細度入力を解釈（1-5以外はNone）
pub fn parse_detail_level(input: &str) -> Option<u8> {
    match input.trim().parse::<u8>() {
        Ok(level) if (1..=5).contains(&level) => Some(level),
        _ => None,
    }
}

/// MultiSelectの選択結果から設定を作成
pub fn config_from_selection(selected: &[usize], detail_level: u8) -> AnalysisRequestConfig {
    AnalysisRequestConfig {
        detail_level,
        is_green_screen: selected.contains(&0),
        is_png_mode: selected.contains(&1),
        is_anime_mode: selected.contains(&2),
    }
}

/// 現在の設定をMultiSelectの初期選択へ
pub fn selection_defaults(config: &AnalysisRequestConfig) -> [bool; 3] {
    [config.is_green_screen, config.is_png_mode, config.is_anime_mode]
}

/// 対話モード
pub async fn run_interactive(
    client: &dyn ModelClient,
    session: &mut Session,
    session_path: &Path,
    mut config: AnalysisRequestConfig,
) -> Result<()> {
    println!("---");
    println!("対話モード（矢印キーで選択、Enterで決定）");
    println!("---\n");

    loop {
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        let selected = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;
        let action = MenuAction::ALL[selected];

        if action.requires_results() && !session.has_results() {
            render::print_notice(&Notice::info("解析結果がありません"));
            continue;
        }

        match action {
            MenuAction::ShowResults => {
                if session.has_results() {
                    render::print_cards(session);
                } else {
                    render::print_notice(&Notice::info("解析結果がありません"));
                }
            }
            MenuAction::ContentIdeas | MenuAction::ExpandKeywords => {
                let kind = if action == MenuAction::ContentIdeas {
                    FeatureKind::ContentIdeas
                } else {
                    FeatureKind::ExpandKeywords
                };
                let index = prompt_result_index(session)?;
                run_feature(client, session, index, kind).await;
                save_quietly(session, session_path);
            }
            MenuAction::CopyDescription | MenuAction::CopyKeywords => {
                let target = if action == MenuAction::CopyDescription {
                    CopyTarget::Description
                } else {
                    CopyTarget::Keywords
                };
                let index = prompt_result_index(session)?;
                let item = session.item(index)?;
                render::print_copy_payload(item, target);
            }
            MenuAction::DownloadAll => {
                let dir: String = Input::new()
                    .with_prompt("出力ディレクトリ")
                    .default(".".to_string())
                    .interact_text()?;
                match write_export(session, Path::new(dir.trim())) {
                    Ok(WriteOutcome::Written { notice, .. }) => render::print_notice(&notice),
                    Ok(WriteOutcome::Skipped(notice)) => render::print_notice(&notice),
                    Err(e) => render::print_notice(&Notice::error(e.to_string())),
                }
            }
            MenuAction::Reanalyze => {
                config = prompt_config(&config)?;
                run_analysis(client, session, config).await;
                save_quietly(session, session_path);
            }
            MenuAction::SelectFile => {
                let path: String = Input::new().with_prompt("画像ファイル").interact_text()?;
                match load_image(&PathBuf::from(path.trim())) {
                    Ok(image) => {
                        session.select_file(image);
                        config.detail_level = DEFAULT_DETAIL_LEVEL;
                        render::print_notice(&Notice::info("画像を選択しました。再解析してください"));
                    }
                    Err(e) => {
                        session.reset();
                        render::print_notice(&Notice::error(e.to_string()));
                    }
                }
            }
            MenuAction::Quit => {
                session_store::save(session, session_path)?;
                println!("✔ 保存しました: {}", session_path.display());
                break;
            }
        }
        println!();
    }

    Ok(())
}

/// 一次解析を実行して結果を表示（エラーは通知のみ）
pub async fn run_analysis(
    client: &dyn ModelClient,
    session: &mut Session,
    config: AnalysisRequestConfig,
) -> bool {
    let pb = render::spinner("解析中...");
    let result = analyzer::analyze(client, session, config).await;
    pb.finish_and_clear();
    render::bell();

    match result {
        Ok(AnalysisOutcome::Completed(count)) => {
            render::print_notice(&Notice::success(format!("{}件の結果", count)));
            render::print_cards(session);
            true
        }
        Ok(AnalysisOutcome::Empty(notice)) => {
            render::print_notice(&notice);
            true
        }
        Err(e) => {
            render::print_notice(&Notice::error(format!(
                "An error occurred during the main analysis: {}",
                e
            )));
            false
        }
    }
}

/// 二次生成を実行して出力を表示（失敗時は結果を変更しない）
pub async fn run_feature(
    client: &dyn ModelClient,
    session: &mut Session,
    index: usize,
    kind: FeatureKind,
) -> bool {
    let pb = render::spinner(&format!("Generating {}...", kind.label()));
    let result = analyzer::generate_feature(client, session, index, kind).await;
    pb.finish_and_clear();

    match result {
        Ok(output) => {
            println!("{}", output.display_text());
            true
        }
        Err(e) => {
            println!("{}", kind.failure_text());
            render::print_notice(&failure_notice(kind, &e));
            false
        }
    }
}

fn prompt_result_index(session: &Session) -> Result<usize> {
    if session.results.len() == 1 {
        return Ok(0);
    }

    let titles: Vec<String> = session
        .results
        .iter()
        .enumerate()
        .map(|(i, item)| render::card_title(item, i))
        .collect();
    let index = Select::new()
        .with_prompt("対象の結果")
        .items(&titles)
        .default(0)
        .interact()?;
    Ok(index)
}

fn prompt_config(current: &AnalysisRequestConfig) -> Result<AnalysisRequestConfig> {
    let defaults = selection_defaults(current);
    let selected = MultiSelect::new()
        .with_prompt("モード（Spaceで切替）")
        .items(&MODE_LABELS)
        .defaults(&defaults)
        .interact()?;

    let detail: String = Input::new()
        .with_prompt("詳細度 (1-5)")
        .default(current.detail_level.to_string())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            parse_detail_level(input).map(|_| ()).ok_or("1から5で入力してください")
        })
        .interact_text()?;

    let level = parse_detail_level(&detail)
        .ok_or_else(|| StockMetaError::Prompt(format!("不正な詳細度: {}", detail)))?;
    Ok(config_from_selection(&selected, level))
}

fn save_quietly(session: &Session, path: &Path) {
    if let Err(e) = session_store::save(session, path) {
        warn!("セッション保存に失敗: {}", e);
    }
}
