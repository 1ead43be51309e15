use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use eframe::egui::{self, Color32, RichText};
use eframe::egui::{FontData, FontDefinitions, FontFamily};
use scan_ai_common::{
    reduce, result_lines, ImageRef, SubmissionEvent, SubmissionPhase, FAILURE_ALERT,
    IMAGE_EXTENSIONS,
};

use crate::io::{load_preview, resolve_cli_binary, run_classify, PREVIEW_SIZE};
use crate::model::{AppState, Preview, UiMessage};

pub struct DesktopApp {
    state: AppState,
    preview: Option<(PathBuf, egui::TextureHandle)>,
    pending_preview: Option<Preview>,
    preview_inflight: bool,
    preview_tx: Sender<UiMessage>,
    preview_rx: Receiver<UiMessage>,
    predict_rx: Option<Receiver<UiMessage>>,
}

impl DesktopApp {
    fn apply(&mut self, event: SubmissionEvent) {
        self.state.submission = reduce(&self.state.submission, &event);
    }

    fn pick_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            // キャンセル
            return;
        };

        self.apply(SubmissionEvent::ImageSelected(ImageRef::new(path.clone())));
        self.request_preview(path.clone());
        self.submit_image(path);
    }

    fn submit_image(&mut self, path: PathBuf) {
        let cli = resolve_cli_binary();
        let crop_square = self.state.crop_square;
        let (tx, rx) = mpsc::channel();
        self.predict_rx = Some(rx);
        self.apply(SubmissionEvent::SubmissionStarted);

        std::thread::spawn(move || {
            let result = run_classify(&cli, &path, crop_square).map_err(|err| err.to_string());
            let _ = tx.send(UiMessage::PredictDone(result));
        });
    }

    fn request_preview(&mut self, path: PathBuf) {
        self.preview = None;
        self.preview_inflight = true;
        let sender = self.preview_tx.clone();

        std::thread::spawn(move || {
            // デコードできない画像は空のプレビューで返す
            let preview = load_preview(&path).unwrap_or(Preview {
                path,
                size: [0, 0],
                pixels: Vec::new(),
            });
            let _ = sender.send(UiMessage::PreviewReady(preview));
        });
    }

    fn poll_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.preview_rx.try_recv() {
            if let UiMessage::PreviewReady(preview) = msg {
                self.preview_inflight = false;
                self.pending_preview = Some(preview);
            }
        }
        if let Some(preview) = self.pending_preview.take().filter(|p| p.size[0] > 0 && p.size[1] > 0) {
            let selected = self
                .state
                .submission
                .selected_image
                .as_ref()
                .map(|image| image.path().to_path_buf());
            // 古い選択のプレビューは捨てる
            if selected.as_deref() == Some(preview.path.as_path()) {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.pixels);
                let name = preview.path.display().to_string();
                let texture = ctx.load_texture(name, color_image, egui::TextureOptions::default());
                self.preview = Some((preview.path, texture));
            }
        }

        let Some(rx) = &self.predict_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(UiMessage::PredictDone(Ok(prediction))) => {
                self.predict_rx = None;
                self.apply(SubmissionEvent::SubmissionSucceeded(prediction));
            }
            Ok(UiMessage::PredictDone(Err(reason))) => {
                self.predict_rx = None;
                self.apply(SubmissionEvent::SubmissionFailed(reason));
                self.state.alert = Some(FAILURE_ALERT.to_string());
            }
            Ok(UiMessage::PreviewReady(_)) | Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                // ワーカーが結果を返さずに終了した
                self.predict_rx = None;
                self.apply(SubmissionEvent::SubmissionAbandoned);
                self.state.alert = Some(FAILURE_ALERT.to_string());
            }
        }
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let submission = &self.state.submission;
        match submission.phase() {
            SubmissionPhase::Submitting => {
                ui.add(egui::Spinner::new().size(32.0));
            }
            SubmissionPhase::Succeeded => {
                if let Some(prediction) = &submission.result {
                    for (i, line) in result_lines(prediction).iter().enumerate() {
                        let text = RichText::new(line);
                        // 先頭2行（ラベルと信頼度）を強調
                        let text = if i < 2 { text.size(18.0).strong() } else { text.size(13.0) };
                        ui.label(text);
                    }
                }
            }
            SubmissionPhase::Failed => {
                if let Some(reason) = &submission.failure {
                    ui.label(RichText::new(reason).color(Color32::from_gray(150)).size(12.0));
                }
            }
            SubmissionPhase::Idle => {}
        }
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alert.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.state.alert = None;
                }
            });
    }
}

pub fn configure_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let candidates = [
        r"C:\Windows\Fonts\meiryo.ttc",
        r"C:\Windows\Fonts\msgothic.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    ];

    for path in candidates {
        if let Ok(data) = std::fs::read(path) {
            fonts.font_data.insert("jp_fallback".to_string(), FontData::from_owned(data));
            fonts.families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("jp_fallback".to_string());
            ctx.set_fonts(fonts);
            return;
        }
    }
}

impl Default for DesktopApp {
    fn default() -> Self {
        let (preview_tx, preview_rx) = mpsc::channel();
        Self {
            state: AppState::default(),
            preview: None,
            pending_preview: None,
            preview_inflight: false,
            preview_tx,
            preview_rx,
            predict_rx: None,
        }
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.submission.is_submitting || self.preview_inflight {
            ctx.request_repaint();
        }
        self.poll_messages(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                let busy = self.state.submission.is_submitting || self.state.alert.is_some();
                if ui.add_enabled(!busy, egui::Button::new("Pick MRI Image")).clicked() {
                    self.pick_image();
                }
                ui.checkbox(&mut self.state.crop_square, "Crop to square");

                ui.add_space(20.0);
                let size = egui::vec2(PREVIEW_SIZE as f32, PREVIEW_SIZE as f32);
                if let Some((_, texture)) = &self.preview {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                } else if let Some(image) = &self.state.submission.selected_image {
                    ui.label(RichText::new(image.file_name()).color(Color32::from_gray(170)));
                }

                ui.add_space(20.0);
                self.render_result(ui);
            });
        });

        self.render_alert(ctx);
    }
}
