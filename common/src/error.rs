//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    /// 推論サービスが `{"error": ...}` を返した
    #[error("Service error: {0}")]
    Service(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let error = Error::Parse("confidenceがありません".to_string());
        assert_eq!(format!("{}", error), "Parse error: confidenceがありません");
    }

    #[test]
    fn test_error_display_service() {
        let error = Error::Service("cannot identify image file".to_string());
        assert_eq!(format!("{}", error), "Service error: cannot identify image file");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Parse("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Parse"));
        assert!(debug.contains("テスト"));
    }
}
