//! レスポンスパーサー
//!
//! `/predict` のレスポンスボディを検証して Prediction に変換する。
//! 形の崩れたボディは描画前にエラーとして弾く。

use crate::error::{Error, Result};
use crate::types::{Prediction, PredictionResponse};

/// `/predict` のレスポンスをパース
///
/// # Returns
/// * `Ok(Prediction)` - `prediction` と `confidence`（0.0〜1.0）が揃っている
/// * `Err(Error::Service)` - サービスが `error` を返した
/// * `Err(Error::Parse)` - JSONでない、またはフィールド不足・範囲外
///
/// # Examples
/// ```
/// use scan_ai_common::parse_prediction_response;
///
/// let p = parse_prediction_response(r#"{"prediction":"glioma","confidence":0.87}"#).unwrap();
/// assert_eq!(p.label, "glioma");
/// ```
pub fn parse_prediction_response(body: &str) -> Result<Prediction> {
    let response: PredictionResponse = serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("JSONパースエラー: {}", e)))?;
    validate_response(response)
}

/// パース済みレスポンスを検証
pub fn validate_response(response: PredictionResponse) -> Result<Prediction> {
    if let Some(message) = response.error {
        return Err(Error::Service(message));
    }

    let label = response
        .prediction
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| Error::Parse("predictionがありません".into()))?;

    let confidence = response
        .confidence
        .ok_or_else(|| Error::Parse("confidenceがありません".into()))?;

    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(Error::Parse(format!("confidenceが範囲外です: {}", confidence)));
    }

    Ok(Prediction {
        label,
        confidence,
        description: response.description,
        recommendation: response.recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_response() {
        let p = parse_prediction_response(r#"{"prediction":"glioma","confidence":0.87}"#).unwrap();
        assert_eq!(p.label, "glioma");
        assert_eq!(p.confidence, 0.87);
        assert!(p.description.is_none());
    }

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "prediction": "pituitary",
            "confidence": 0.9312,
            "description": "Pituitary tumors develop in the pituitary gland at the base of the brain.",
            "recommendation": "Consult an endocrinologist or neurosurgeon for assessment and possible treatment."
        }"#;
        let p = parse_prediction_response(body).unwrap();
        assert_eq!(p.label, "pituitary");
        assert!(p.description.unwrap().starts_with("Pituitary tumors"));
        assert!(p.recommendation.is_some());
    }

    #[test]
    fn test_parse_error_body() {
        let err = parse_prediction_response(r#"{"error":"cannot identify image file"}"#).unwrap_err();
        assert!(matches!(err, Error::Service(ref m) if m == "cannot identify image file"));
    }

    #[test]
    fn test_parse_missing_fields() {
        assert!(matches!(
            parse_prediction_response(r#"{"confidence":0.5}"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_prediction_response(r#"{"prediction":"notumor"}"#),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            parse_prediction_response(r#"{"prediction":"  ","confidence":0.5}"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_confidence_out_of_range() {
        assert!(parse_prediction_response(r#"{"prediction":"glioma","confidence":1.5}"#).is_err());
        assert!(parse_prediction_response(r#"{"prediction":"glioma","confidence":-0.1}"#).is_err());
    }

    #[test]
    fn test_parse_confidence_bounds_inclusive() {
        assert!(parse_prediction_response(r#"{"prediction":"glioma","confidence":0}"#).is_ok());
        assert!(parse_prediction_response(r#"{"prediction":"glioma","confidence":1}"#).is_ok());
    }

    #[test]
    fn test_parse_wrong_types() {
        assert!(parse_prediction_response(r#"{"prediction":3,"confidence":"high"}"#).is_err());
        assert!(parse_prediction_response("<html>502 Bad Gateway</html>").is_err());
        assert!(parse_prediction_response("").is_err());
    }
}
