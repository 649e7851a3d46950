use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use stock_meta_common::{FeatureKind, Notice, Session};
use stock_meta_rust::{cli, config, export, gemini, interactive, logging, render, session_store, upload};
use cli::{Cli, Commands};
use config::Config;
use gemini::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Analyze { image, mode, session } => {
            println!("📸 stock-meta - 画像解析\n");

            let client = GeminiClient::from_config(&config)?;
            let session_path = session.unwrap_or_else(|| session_store::default_session_path(&image));
            let request = mode.to_config(config.detail_level());

            let mut state = Session::new();
            state.select_file(upload::load_image(&image)?);

            let ok = interactive::run_analysis(&client, &mut state, request).await;
            session_store::save(&state, &session_path)?;
            println!("✔ セッションを保存: {}", session_path.display());

            if !ok {
                std::process::exit(1);
            }
        }

        Commands::Run { image, mode, session } => {
            println!("🚀 stock-meta - 対話モード\n");

            let client = GeminiClient::from_config(&config)?;
            let session_path = session.unwrap_or_else(|| session_store::default_session_path(&image));
            let request = mode.to_config(config.detail_level());

            let mut state = Session::new();
            match upload::load_image(&image) {
                Ok(uploaded) => {
                    state.select_file(uploaded);
                    interactive::run_analysis(&client, &mut state, request).await;
                }
                Err(e) => render::print_notice(&Notice::error(e.to_string())),
            }

            interactive::run_interactive(&client, &mut state, &session_path, request).await?;
        }

        Commands::Ideas { session, index } => {
            run_feature_command(&config, &session, index, FeatureKind::ContentIdeas).await?;
        }

        Commands::Expand { session, index } => {
            run_feature_command(&config, &session, index, FeatureKind::ExpandKeywords).await?;
        }

        Commands::Export { session, output } => {
            println!("📄 stock-meta - エクスポート\n");

            let saved = session_store::load(&session)?;
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));

            match export::write_export(&saved.session, &output_dir)? {
                export::WriteOutcome::Written { path, notice } => {
                    render::print_notice(&notice);
                    println!("  → {}", path.display());
                }
                export::WriteOutcome::Skipped(notice) => render::print_notice(&notice),
            }
        }

        Commands::Show { session } => {
            let saved = session_store::load(&session)?;
            if let Some(image) = saved.session.image.as_ref() {
                println!("画像: {} ({})", image.file_name, image.mime_type);
            }
            println!("保存日時: {}\n", saved.saved_at.format("%Y-%m-%d %H:%M:%S"));

            if saved.session.has_results() {
                render::print_cards(&saved.session);
            } else {
                render::print_notice(&Notice::info("解析結果がありません"));
            }
        }

        Commands::Config { set_api_key, set_model, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if let Some(model) = set_model {
                config.set_model(model)?;
                println!("✔ モデルを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIエンドポイント: {}", config.api_base_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  詳細度（デフォルト）: {}", config.detail_level());
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}

/// 保存済みセッションに対して二次生成を1回実行
async fn run_feature_command(
    config: &Config,
    session_path: &Path,
    number: usize,
    kind: FeatureKind,
) -> anyhow::Result<()> {
    let client = GeminiClient::from_config(config)?;
    let mut saved = session_store::load(session_path)?;
    let index = cli::to_zero_based(number);

    // 範囲外は通信前に弾く
    saved.session.item(index)?;

    let ok = interactive::run_feature(&client, &mut saved.session, index, kind).await;
    if ok {
        session_store::save(&saved.session, session_path)?;
        println!("\n✔ セッションを更新: {}", session_path.display());
    } else {
        std::process::exit(1);
    }
    Ok(())
}
