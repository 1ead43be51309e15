//! テスト用のピッカー・サービス・描画先

#![allow(dead_code)]

use async_trait::async_trait;
use scan_ai_common::{ImageRef, Prediction, SubmissionState};
use scan_ai_rust::client::PredictionService;
use scan_ai_rust::error::{Result, ScanAiError};
use scan_ai_rust::flow::{Notifier, Renderer};
use scan_ai_rust::picker::{MediaPicker, PickOutcome, PickedImage, PickerOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// 決まった結果を返すピッカー
pub enum StubPicker {
    Cancel,
    Pick(PathBuf),
    Fail(String),
}

impl MediaPicker for StubPicker {
    fn pick_image(&self, _options: &PickerOptions) -> Result<PickOutcome> {
        match self {
            StubPicker::Cancel => Ok(PickOutcome::Cancelled),
            StubPicker::Pick(path) => Ok(PickOutcome::Picked(PickedImage::new(path.clone()))),
            StubPicker::Fail(message) => Err(ScanAiError::Picker(message.clone())),
        }
    }
}

/// 受け取った画像を記録し、決まった結果を返すサービス
#[derive(Clone)]
pub struct FakeService {
    response: std::result::Result<Prediction, String>,
    pub calls: Arc<Mutex<Vec<ImageRef>>>,
}

impl FakeService {
    pub fn ok(label: &str, confidence: f64) -> Self {
        Self {
            response: Ok(Prediction::new(label, confidence)),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PredictionService for FakeService {
    async fn predict(&self, image: &ImageRef) -> Result<Prediction> {
        self.calls.lock().unwrap().push(image.clone());
        self.response
            .clone()
            .map_err(|message| ScanAiError::Common(scan_ai_common::Error::Service(message)))
    }
}

/// 決着しないサービス
pub struct PendingService;

#[async_trait]
impl PredictionService for PendingService {
    async fn predict(&self, _image: &ImageRef) -> Result<Prediction> {
        std::future::pending::<Result<Prediction>>().await
    }
}

/// 描画された状態を全て記録する
#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<SubmissionState>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, state: &SubmissionState) {
        self.frames.push(state.clone());
    }
}

#[derive(Default)]
pub struct CountingNotifier {
    pub alerts: Vec<String>,
}

impl Notifier for CountingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
