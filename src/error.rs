use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像ではありません: {0}")]
    NotAnImage(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像選択エラー: {0}")]
    Picker(String),

    #[error("APIがエラーを返しました: HTTP {status}")]
    HttpStatus { status: u16, body: String },

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] scan_ai_common::Error),
}

pub type Result<T> = std::result::Result<T, ScanAiError>;
