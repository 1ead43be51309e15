//! 送信フローのテスト
//!
//! 状態遷移・アラート回数・キャンセル時の不変性を検証

mod support;

use scan_ai_common::{ImageRef, SubmissionPhase, SubmissionState, FAILURE_ALERT};
use scan_ai_rust::flow::{FlowOutcome, ImageSubmissionFlow};
use std::path::PathBuf;
use std::time::Duration;
use support::{CountingNotifier, FakeService, PendingService, RecordingRenderer, StubPicker};

fn flow_with(
    picker: StubPicker,
    service: FakeService,
) -> ImageSubmissionFlow<StubPicker, FakeService, RecordingRenderer, CountingNotifier> {
    ImageSubmissionFlow::new(
        picker,
        service,
        RecordingRenderer::default(),
        CountingNotifier::default(),
    )
}

/// 成功時: is_submitting は送信中のフレームだけ true
#[tokio::test]
async fn test_success_submitting_only_between_dispatch_and_settle() {
    let service = FakeService::ok("glioma", 0.87);
    let mut flow = flow_with(StubPicker::Pick("r1.jpg".into()), service.clone());

    let outcome = flow.select_image().await;
    assert!(matches!(outcome, FlowOutcome::Succeeded(ref p) if p.label == "glioma"));

    let frames = &flow.renderer().frames;
    let flags: Vec<bool> = frames.iter().map(|f| f.is_submitting).collect();
    assert_eq!(flags, vec![false, true, false]);

    assert_eq!(frames[0].selected_image, Some(ImageRef::new("r1.jpg")));
    assert!(frames[1].result.is_none());
    assert_eq!(frames[2].result.as_ref().unwrap().confidence, 0.87);

    assert_eq!(flow.state().phase(), SubmissionPhase::Succeeded);
    assert_eq!(service.call_count(), 1);
    assert!(flow.notifier().alerts.is_empty());
}

/// 失敗時: 結果なし、アラートはちょうど1回
#[tokio::test]
async fn test_failure_alerts_once_and_leaves_result_absent() {
    let service = FakeService::failing("HTTP 500");
    let mut flow = flow_with(StubPicker::Pick("r2.jpg".into()), service.clone());

    let outcome = flow.select_image().await;
    assert!(matches!(outcome, FlowOutcome::Failed(_)));

    assert!(flow.state().result.is_none());
    assert!(!flow.state().is_submitting);
    assert_eq!(flow.state().phase(), SubmissionPhase::Failed);
    assert_eq!(flow.notifier().alerts, vec![FAILURE_ALERT.to_string()]);
    assert_eq!(service.call_count(), 1);
}

/// キャンセル: 状態は変わらず、リクエストもしない
#[tokio::test]
async fn test_cancel_does_not_touch_state() {
    let service = FakeService::ok("glioma", 0.87);
    let mut flow = flow_with(StubPicker::Cancel, service.clone());

    let outcome = flow.select_image().await;

    assert_eq!(outcome, FlowOutcome::Cancelled);
    assert_eq!(flow.state(), &SubmissionState::default());
    assert!(flow.renderer().frames.is_empty());
    assert!(flow.notifier().alerts.is_empty());
    assert_eq!(service.call_count(), 0);
}

/// 新しい画像を選ぶと、送信前に前回の結果が消える
#[tokio::test]
async fn test_new_selection_clears_previous_result_before_dispatch() {
    let service = FakeService::ok("meningioma", 0.64);
    let mut flow = flow_with(StubPicker::Pick("r1.jpg".into()), service.clone());

    flow.select_image().await;
    assert!(flow.state().result.is_some());
    let first_run = flow.renderer().frames.len();

    flow.select_image().await;
    let second_run = &flow.renderer().frames[first_run..];

    // 選択直後と送信開始の時点で結果は空
    assert!(second_run[0].result.is_none());
    assert!(!second_run[0].is_submitting);
    assert!(second_run[1].result.is_none());
    assert!(second_run[1].is_submitting);
    assert!(second_run[2].result.is_some());
    assert_eq!(service.call_count(), 2);
}

/// ピッカー失敗は送信失敗と同じ扱い（状態は変えない）
#[tokio::test]
async fn test_picker_failure_is_reported_like_network_failure() {
    let service = FakeService::ok("glioma", 0.87);
    let mut flow = flow_with(StubPicker::Fail("permission denied".into()), service.clone());

    let outcome = flow.select_image().await;

    assert!(matches!(outcome, FlowOutcome::Failed(ref r) if r.contains("permission denied")));
    assert_eq!(flow.state(), &SubmissionState::default());
    assert_eq!(flow.notifier().alerts.len(), 1);
    assert_eq!(service.call_count(), 0);
}

/// future が破棄されても is_submitting は false に戻る
#[tokio::test]
async fn test_dropped_submission_releases_submitting_flag() {
    let mut flow = ImageSubmissionFlow::new(
        StubPicker::Cancel,
        PendingService,
        RecordingRenderer::default(),
        CountingNotifier::default(),
    );
    let image = ImageRef::new(PathBuf::from("hung.jpg"));

    let timed_out = tokio::time::timeout(Duration::from_millis(20), flow.submit_image(&image)).await;
    assert!(timed_out.is_err());

    assert!(!flow.state().is_submitting);
    let flags: Vec<bool> = flow.renderer().frames.iter().map(|f| f.is_submitting).collect();
    assert_eq!(flags, vec![true, false]);
    assert!(flow.notifier().alerts.is_empty());
}
