use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stock_meta_common::AnalysisRequestConfig;

#[derive(Parser)]
#[command(name = "stock-meta")]
#[command(about = "ストック素材向け画像メタデータ生成ツール（Gemini解析）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 解析モード
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// グリーンバック動画モード
    #[arg(long)]
    pub green_screen: bool,

    /// 透過PNGモード（PNG画像のみ適用）
    #[arg(long)]
    pub png: bool,

    /// アニメ調モード
    #[arg(long)]
    pub anime: bool,

    /// 詳細度 1-5（省略時は設定ファイルの値、未設定なら3）
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub detail: Option<u8>,
}

impl ModeArgs {
    pub fn to_config(&self, default_detail_level: u8) -> AnalysisRequestConfig {
        AnalysisRequestConfig {
            detail_level: self.detail.unwrap_or(default_detail_level),
            is_green_screen: self.green_screen,
            is_png_mode: self.png,
            is_anime_mode: self.anime,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を解析してセッションJSONを保存
    Analyze {
        /// 画像ファイル（最大4MB）
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        mode: ModeArgs,

        /// セッションファイル（デフォルト: 画像フォルダ/<名前>.session.json）
        #[arg(short, long)]
        session: Option<PathBuf>,
    },

    /// 解析後に対話モードへ
    Run {
        /// 画像ファイル（最大4MB）
        #[arg(required = true)]
        image: PathBuf,

        #[command(flatten)]
        mode: ModeArgs,

        /// セッションファイル（デフォルト: 画像フォルダ/<名前>.session.json）
        #[arg(short, long)]
        session: Option<PathBuf>,
    },

    /// コンテンツアイデアを生成
    Ideas {
        /// セッションファイル
        #[arg(required = true)]
        session: PathBuf,

        /// 結果番号（1始まり）
        #[arg(short, long, value_parser = parse_result_number)]
        index: usize,
    },

    /// キーワードを拡張
    Expand {
        /// セッションファイル
        #[arg(required = true)]
        session: PathBuf,

        /// 結果番号（1始まり）
        #[arg(short, long, value_parser = parse_result_number)]
        index: usize,
    },

    /// 全結果をテキストファイルに書き出し
    Export {
        /// セッションファイル
        #[arg(required = true)]
        session: PathBuf,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 保存済みセッションの結果を表示
    Show {
        /// セッションファイル
        #[arg(required = true)]
        session: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデル名を設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 1始まりの結果番号
pub fn parse_result_number(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Invalid result number: {}. Use 1 or greater", s)),
    }
}

/// 1始まりの番号を0始まりのインデックスへ
pub fn to_zero_based(number: usize) -> usize {
    number.saturating_sub(1)
}
