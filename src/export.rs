//! エクスポートファイルの書き出し

use crate::error::Result;
use std::path::{Path, PathBuf};
use stock_meta_common::{build_export, ExportOutcome, Notice, Session};
use tracing::info;

/// 書き出し結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: PathBuf, notice: Notice },
    Skipped(Notice),
}

/// セッションの全結果をテキストファイルに書き出す
///
/// 結果がない場合はファイルを作らず通知のみ返す
pub fn write_export(session: &Session, output_dir: &Path) -> Result<WriteOutcome> {
    let document = match build_export(session) {
        ExportOutcome::Ready(document) => document,
        ExportOutcome::Empty(notice) => return Ok(WriteOutcome::Skipped(notice)),
    };

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&document.file_name);
    std::fs::write(&path, document.content)?;
    info!(path = %path.display(), "エクスポート完了");

    Ok(WriteOutcome::Written {
        notice: Notice::success(format!("File {} saved successfully!", document.file_name)),
        path,
    })
}
