//! 画面状態とリデューサー
//!
//! 1画面分の送信状態を不変の構造体として持ち、
//! `reduce(state, event) -> state` の純粋関数で遷移させる。

use serde::{Deserialize, Serialize};

use crate::types::{ImageRef, Prediction};

/// 画面の送信状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionState {
    pub selected_image: Option<ImageRef>,
    pub is_submitting: bool,
    pub result: Option<Prediction>,
    /// 直近の失敗理由（ステータス表示用）
    pub failure: Option<String>,
}

/// 状態遷移イベント
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    /// ピッカーで画像が選ばれた
    ImageSelected(ImageRef),
    /// リクエスト送信
    SubmissionStarted,
    SubmissionSucceeded(Prediction),
    SubmissionFailed(String),
    /// 決着前にリクエストが破棄された
    SubmissionAbandoned,
}

/// 1回の送信のフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn phase(&self) -> SubmissionPhase {
        if self.is_submitting {
            SubmissionPhase::Submitting
        } else if self.result.is_some() {
            SubmissionPhase::Succeeded
        } else if self.failure.is_some() {
            SubmissionPhase::Failed
        } else {
            SubmissionPhase::Idle
        }
    }
}

/// 状態遷移
pub fn reduce(state: &SubmissionState, event: &SubmissionEvent) -> SubmissionState {
    match event {
        SubmissionEvent::ImageSelected(image) => SubmissionState {
            selected_image: Some(image.clone()),
            is_submitting: state.is_submitting,
            result: None,
            failure: None,
        },
        SubmissionEvent::SubmissionStarted => SubmissionState {
            is_submitting: true,
            result: None,
            failure: None,
            ..state.clone()
        },
        SubmissionEvent::SubmissionSucceeded(prediction) => SubmissionState {
            is_submitting: false,
            result: Some(prediction.clone()),
            failure: None,
            ..state.clone()
        },
        SubmissionEvent::SubmissionFailed(reason) => SubmissionState {
            is_submitting: false,
            result: None,
            failure: Some(reason.clone()),
            ..state.clone()
        },
        SubmissionEvent::SubmissionAbandoned => SubmissionState {
            is_submitting: false,
            ..state.clone()
        },
    }
}
