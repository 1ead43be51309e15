use std::path::PathBuf;

use scan_ai_common::{Prediction, SubmissionState};

/// デコード済みプレビュー画像
pub struct Preview {
    pub path: PathBuf,
    pub size: [usize; 2],
    pub pixels: Vec<u8>,
}

pub enum UiMessage {
    PredictDone(Result<Prediction, String>),
    PreviewReady(Preview),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub submission: SubmissionState,
    /// 表示中のアラート（閉じるまで残る）
    pub alert: Option<String>,
    pub crop_square: bool,
}
