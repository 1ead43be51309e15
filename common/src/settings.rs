//! アップロード設定

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_URL: &str = "http://10.0.2.2:8000/predict";
pub const DEFAULT_FIELD_NAME: &str = "file";
pub const DEFAULT_FILE_NAME: &str = "upload.jpg";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// multipartアップロードの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadSettings {
    pub endpoint_url: String,
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            field_name: DEFAULT_FIELD_NAME.into(),
            file_name: DEFAULT_FILE_NAME.into(),
            mime_type: DEFAULT_MIME_TYPE.into(),
        }
    }
}

impl UploadSettings {
    /// エンドポイントURLからサービスルートを求める（`.../predict` → `.../`）
    pub fn service_root(&self) -> String {
        let url = self.endpoint_url.trim_end_matches('/');
        // スキーム部分 ("http://") は残す
        let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
        match url[scheme_end..].rfind('/') {
            Some(idx) => url[..scheme_end + idx + 1].to_string(),
            None => format!("{}/", url),
        }
    }
}
