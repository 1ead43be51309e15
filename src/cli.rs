use crate::picker::CropMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scan-ai")]
#[command(about = "MRI画像を推論サービスへ送り、分類結果を表示するクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 推論エンドポイントを一時的に上書き
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を1枚選んで分類する
    Classify {
        /// 画像ファイル（省略時はフォルダから対話的に選択）
        image: Option<PathBuf>,

        /// 選択元フォルダ（デフォルト: カレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// 送信前の編集
        #[arg(long, value_enum, default_value = "none")]
        crop: CropMode,

        /// 編集を無効化
        #[arg(long)]
        no_edit: bool,

        /// 結果をJSONでstdoutに出力
        #[arg(long)]
        json: bool,
    },

    /// 推論サービスの死活確認
    Ping,

    /// 設定を表示/編集
    Config {
        /// 推論エンドポイントURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト秒数を設定（0で無効）
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
