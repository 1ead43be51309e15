//! 結果表示のフォーマット

use crate::types::Prediction;

/// 失敗時にユーザーへ出す汎用メッセージ
pub const FAILURE_ALERT: &str = "Error connecting to backend";

/// 0.0〜1.0 をパーセント表記（小数2桁）に変換
///
/// ```
/// assert_eq!(scan_ai_common::format_confidence(0.5), "50.00%");
/// ```
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// 結果行（`Prediction: ...` / `Confidence: ...%`）
pub fn result_lines(prediction: &Prediction) -> Vec<String> {
    let mut lines = vec![
        format!("Prediction: {}", prediction.label),
        format!("Confidence: {}", format_confidence(prediction.confidence)),
    ];
    if let Some(description) = &prediction.description {
        lines.push(description.clone());
    }
    if let Some(recommendation) = &prediction.recommendation {
        lines.push(format!("Recommendation: {}", recommendation));
    }
    lines
}
