//! ターミナル表示
//!
//! 結果カード・通知・コピー用テキスト・スピナー

use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;
use stock_meta_common::{AnalysisResultItem, Notice, NoticeKind, Session};

pub const NO_DESCRIPTION: &str = "No description generated";
pub const NO_KEYWORDS: &str = "No keywords generated";

const COPY_RULE: &str = "----------------------------------------";

/// コピー対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Description,
    Keywords,
}

impl CopyTarget {
    pub fn label(&self) -> &'static str {
        match self {
            CopyTarget::Description => "Description",
            CopyTarget::Keywords => "Keywords",
        }
    }
}

/// カードのタイトル（` (#i)` 付き）
pub fn card_title(item: &AnalysisResultItem, index: usize) -> String {
    format!("{} (#{})", item.display_title(index), index + 1)
}

/// 結果カード1枚分のテキスト
pub fn render_card(item: &AnalysisResultItem, index: usize) -> String {
    let description = if item.description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        item.description.clone()
    };
    let keywords = if item.keywords.is_empty() {
        NO_KEYWORDS.to_string()
    } else {
        item.keywords_joined()
    };

    let mut out = format!(
        "━━ {} ━━\nDescription: {}\nKeywords ({}): {}\n",
        card_title(item, index),
        description,
        item.keywords.len(),
        keywords
    );

    if let Some(ideas) = item.creative_content_ideas.as_deref() {
        out.push_str(&format!("\nContent Ideas:\n{}\n", ideas));
    }
    if let Some(expanded) = item.expanded_keywords_array.as_ref() {
        out.push_str(&format!("\nExpanded Keywords: {}\n", expanded.join(", ")));
    }

    out
}

/// 全カードを表示
pub fn print_cards(session: &Session) {
    for (index, item) in session.results.iter().enumerate() {
        println!("{}", render_card(item, index));
    }
}

/// コピー用テキスト
pub fn copy_payload(item: &AnalysisResultItem, target: CopyTarget) -> String {
    match target {
        CopyTarget::Description => item.description.clone(),
        CopyTarget::Keywords => item.keywords_joined(),
    }
}

/// コピー用テキストを罫線で挟んで表示
pub fn print_copy_payload(item: &AnalysisResultItem, target: CopyTarget) {
    println!("{}", COPY_RULE);
    println!("{}", copy_payload(item, target));
    println!("{}", COPY_RULE);
    print_notice(&Notice::success(format!("{} ready to copy.", target.label())));
}

pub fn format_notice(notice: &Notice) -> String {
    let mark = match notice.kind {
        NoticeKind::Info => "ℹ",
        NoticeKind::Error => "✗",
        NoticeKind::Success => "✔",
    };
    format!("{} {}", mark, notice.message)
}

/// 通知を表示（エラーは標準エラーへ）
pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Error => eprintln!("{}", format_notice(notice)),
        _ => println!("{}", format_notice(notice)),
    }
}

/// 処理中スピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 完了音（ターミナルベル）
pub fn bell() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}
