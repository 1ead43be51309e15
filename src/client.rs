//! 推論サービスクライアント
//!
//! 画像1枚をmultipartで `POST` し、レスポンスを Prediction に変換する

use crate::config::Config;
use crate::error::{Result, ScanAiError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use scan_ai_common::{parse_prediction_response, ImageRef, Prediction, ServiceStatus, UploadSettings};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, image: &ImageRef) -> Result<Prediction>;
}

pub struct HttpPredictionService {
    client: reqwest::Client,
    settings: UploadSettings,
}

impl HttpPredictionService {
    pub fn new(settings: UploadSettings, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.upload.clone(), config.timeout())
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// 画像バイト列をそのまま1パートのフォームにする
    async fn build_form(&self, image: &ImageRef) -> Result<Form> {
        let bytes = tokio::fs::read(image.path()).await?;
        debug!(bytes = bytes.len(), image = %image, "read image");

        let part = Part::bytes(bytes)
            .file_name(self.settings.file_name.clone())
            .mime_str(&self.settings.mime_type)?;
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }

    /// サービスルートの死活確認 (`GET /`)
    pub async fn health(&self) -> Result<ServiceStatus> {
        let url = self.settings.service_root();
        debug!(%url, "health check");

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<ServiceStatus>().await?)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, image: &ImageRef) -> Result<Prediction> {
        let form = self.build_form(image).await?;
        let endpoint = &self.settings.endpoint_url;
        debug!(%endpoint, field = %self.settings.field_name, "POST multipart");

        let response = self.client.post(endpoint).multipart(form).send().await?;
        let response = ensure_success(response).await?;
        let body = response.text().await?;

        Ok(parse_prediction_response(&body)?)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ScanAiError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}
