use crate::error::{Result, ScanAiError};
use scan_ai_common::UploadSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "SCAN_AI_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(flatten)]
    pub upload: UploadSettings,
    /// 未設定ならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        // 環境変数を優先
        config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok().as_deref());

        Ok(config)
    }

    /// 空でなければエンドポイントを上書きする
    pub fn apply_endpoint_override(&mut self, endpoint: Option<&str>) {
        if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
            self.upload.endpoint_url = endpoint.to_string();
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// `config` コマンド用: 壊れたファイルは既定値で置き換える前提で読む
    pub fn load_for_edit(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(ScanAiError::JsonParse(err)) => {
                warn!(path = %path.display(), error = %err, "config file is corrupt, starting from defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ScanAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("scan-ai").join("config.json"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn set_endpoint(&mut self, url: String) -> Result<()> {
        validate_endpoint(&url)?;
        self.upload.endpoint_url = url;
        self.save()
    }
}

pub fn validate_endpoint(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ScanAiError::Config(format!(
            "エンドポイントはhttp://またはhttps://で始まる必要があります: {}",
            url
        )))
    }
}
