//! 画像送信フロー
//!
//! ピッカー起動 → 状態更新 → 推論リクエスト → 状態更新 の1サイクル。
//! 状態は `scan_ai_common::reduce` でのみ遷移し、遷移のたびに描画する。

use crate::client::PredictionService;
use crate::picker::{MediaPicker, PickOutcome, PickerOptions};
use scan_ai_common::{
    reduce, ImageRef, Prediction, SubmissionEvent, SubmissionState, FAILURE_ALERT,
};
use tracing::{debug, warn};

/// 状態の描画先
pub trait Renderer {
    fn render(&mut self, state: &SubmissionState);
}

/// ユーザーへのアラート
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// 1回の操作の結果
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Cancelled,
    Succeeded(Prediction),
    Failed(String),
}

pub struct ImageSubmissionFlow<P, S, R, N> {
    picker: P,
    service: S,
    renderer: R,
    notifier: N,
    options: PickerOptions,
    state: SubmissionState,
}

impl<P, S, R, N> ImageSubmissionFlow<P, S, R, N>
where
    P: MediaPicker,
    S: PredictionService,
    R: Renderer,
    N: Notifier,
{
    pub fn new(picker: P, service: S, renderer: R, notifier: N) -> Self {
        Self {
            picker,
            service,
            renderer,
            notifier,
            options: PickerOptions::default(),
            state: SubmissionState::default(),
        }
    }

    pub fn with_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// ピッカーを開き、選ばれた画像を送信する
    ///
    /// キャンセル時は状態を変えない。ピッカー自体の失敗は送信失敗と同じく
    /// アラート1回で扱い、状態は変えない。
    pub async fn select_image(&mut self) -> FlowOutcome {
        let picked = match self.picker.pick_image(&self.options) {
            Ok(PickOutcome::Picked(picked)) => picked,
            Ok(PickOutcome::Cancelled) => {
                debug!("picker cancelled");
                return FlowOutcome::Cancelled;
            }
            Err(err) => {
                warn!(error = %err, "picker failed");
                self.notifier.alert(FAILURE_ALERT);
                return FlowOutcome::Failed(err.to_string());
            }
        };

        debug!(source = %picked.source.display(), edited = picked.is_edited(), "image selected");
        self.apply(SubmissionEvent::ImageSelected(picked.image.clone()));

        // 編集済みの一時ファイルは送信が終わるまで保持する
        let outcome = self.submit_image(&picked.image).await;
        drop(picked);
        outcome
    }

    /// 画像を推論サービスへ送る
    ///
    /// `is_submitting` は送信開始で true になり、成功・失敗・future の破棄の
    /// いずれでもちょうど1回 false に戻る。
    pub async fn submit_image(&mut self, image: &ImageRef) -> FlowOutcome {
        let guard = SubmissionGuard::start(&mut self.state, &mut self.renderer);
        debug!(image = %image, "submission dispatched");

        match self.service.predict(image).await {
            Ok(prediction) => {
                debug!(label = %prediction.label, confidence = prediction.confidence, "submission succeeded");
                guard.settle(SubmissionEvent::SubmissionSucceeded(prediction.clone()));
                FlowOutcome::Succeeded(prediction)
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(error = %reason, "submission failed");
                guard.settle(SubmissionEvent::SubmissionFailed(reason.clone()));
                self.notifier.alert(FAILURE_ALERT);
                FlowOutcome::Failed(reason)
            }
        }
    }

    fn apply(&mut self, event: SubmissionEvent) {
        self.state = reduce(&self.state, &event);
        self.renderer.render(&self.state);
    }
}

/// 送信中フラグのスコープガード
///
/// `settle` されずに drop された場合は `SubmissionAbandoned` を適用する
struct SubmissionGuard<'a, R: Renderer> {
    state: &'a mut SubmissionState,
    renderer: &'a mut R,
    settled: bool,
}

impl<'a, R: Renderer> SubmissionGuard<'a, R> {
    fn start(state: &'a mut SubmissionState, renderer: &'a mut R) -> Self {
        let mut guard = Self {
            state,
            renderer,
            settled: false,
        };
        guard.apply(&SubmissionEvent::SubmissionStarted);
        guard
    }

    fn settle(mut self, event: SubmissionEvent) {
        self.apply(&event);
        self.settled = true;
    }

    fn apply(&mut self, event: &SubmissionEvent) {
        *self.state = reduce(&*self.state, event);
        self.renderer.render(&*self.state);
    }
}

impl<R: Renderer> Drop for SubmissionGuard<'_, R> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("submission abandoned before settling");
            self.apply(&SubmissionEvent::SubmissionAbandoned);
        }
    }
}
