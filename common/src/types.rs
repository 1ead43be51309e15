//! 推論結果と画像参照の型定義
//!
//! CLIとデスクトップで共有される型:
//! - ImageRef: ピッカーが返すローカル画像への参照
//! - Prediction: 推論サービスの分類結果
//! - PredictionResponse: `/predict` のレスポンスボディ（検証前）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// ピッカーが受け付ける拡張子（小文字）
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// ローカル画像への不透明な参照
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// 表示用のファイル名
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(rename = "prediction")]
    pub label: String,

    /// 0.0〜1.0
    pub confidence: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            description: None,
            recommendation: None,
        }
    }
}

/// `/predict` のレスポンス
///
/// サービスは失敗時もHTTP 200で `{"error": "..."}` を返すため、
/// 全フィールドを任意として受けてから検証する
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    pub prediction: Option<String>,
    pub confidence: Option<f64>,
    pub description: Option<String>,
    pub recommendation: Option<String>,
    pub error: Option<String>,
}

/// サービスルート (`GET /`) のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub message: String,
}
