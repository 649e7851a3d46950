//! stock-meta-rust
//!
//! Geminiで画像を解析し、ストック素材向けの説明文・キーワードを生成する

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod interactive;
pub mod logging;
pub mod render;
pub mod session_store;
pub mod upload;
