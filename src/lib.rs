//! scan-ai: MRI画像分類クライアント
//!
//! - picker: 画像の選択（パス指定 / フォルダから対話選択）
//! - client: 推論サービスへのmultipart送信
//! - flow: 選択→送信→表示の1サイクル

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod picker;
pub mod terminal;
