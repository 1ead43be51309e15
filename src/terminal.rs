//! ターミナル向けの描画とアラート

use crate::flow::{Notifier, Renderer};
use indicatif::{ProgressBar, ProgressStyle};
use scan_ai_common::{result_lines, SubmissionPhase, SubmissionState};
use std::time::Duration;

/// 送信中はスピナー、成功時は結果行を表示する
pub struct TerminalRenderer {
    spinner: Option<ProgressBar>,
    last_phase: SubmissionPhase,
    /// 結果をstdoutへ出さない（`--json` 時）
    quiet: bool,
}

impl TerminalRenderer {
    pub fn new(quiet: bool) -> Self {
        Self {
            spinner: None,
            last_phase: SubmissionPhase::Idle,
            quiet,
        }
    }

    fn start_spinner(&mut self, state: &SubmissionState) {
        let name = state
            .selected_image
            .as_ref()
            .map(|image| image.file_name())
            .unwrap_or_default();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("推論中... {}", name));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, state: &SubmissionState) {
        let phase = state.phase();
        if phase == self.last_phase {
            return;
        }

        match phase {
            SubmissionPhase::Submitting => self.start_spinner(state),
            SubmissionPhase::Succeeded => {
                self.stop_spinner();
                if !self.quiet {
                    if let Some(prediction) = &state.result {
                        for line in result_lines(prediction) {
                            println!("{}", line);
                        }
                    }
                }
            }
            SubmissionPhase::Failed | SubmissionPhase::Idle => self.stop_spinner(),
        }

        self.last_phase = phase;
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

/// stderrへのアラート
#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }
}
