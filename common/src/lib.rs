//! Stock Meta Common Library
//!
//! CLIと各フロントエンドで共有される型・プロンプト生成・正規化ルール

pub mod types;
pub mod error;
pub mod upload;
pub mod prompts;
pub mod parser;
pub mod normalizer;
pub mod session;
pub mod export;

pub use types::{AnalysisRequestConfig, AnalysisResultItem, FeatureKind, Notice, NoticeKind};
pub use error::{Error, Result};
pub use upload::{UploadedImage, MAX_UPLOAD_BYTES};
pub use prompts::{build_analysis_prompt, build_feature_prompt, DetailGuidance};
pub use parser::{parse_keyword_list, parse_model_response, unwrap_code_fence};
pub use normalizer::{items_from_value, normalize_results};
pub use session::Session;
pub use export::{build_export, export_file_name, render_export, ExportDocument, ExportOutcome, EMPTY_EXPORT_MESSAGE};
