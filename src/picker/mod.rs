//! メディアピッカー
//!
//! 単一画像・編集可・品質劣化なしで画像を1枚選ぶ。
//! キャンセルはエラーではなく `PickOutcome::Cancelled` で返す。

mod edit;
mod scan;

pub use edit::{center_square, crop_square_to_temp, CropMode};
pub use scan::{is_image_path, scan_folder, ImageEntry};

use crate::error::{Result, ScanAiError};
use dialoguer::Select;
use scan_ai_common::ImageRef;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// ピッカー設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    pub allows_editing: bool,
    /// 0.0〜1.0（1.0 = 劣化なし）
    pub quality: f32,
    pub crop: CropMode,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allows_editing: true,
            quality: 1.0,
            crop: CropMode::None,
        }
    }
}

/// 選ばれた画像
///
/// 編集した場合は一時ファイルを保持し、drop時に削除する
#[derive(Debug)]
pub struct PickedImage {
    pub image: ImageRef,
    pub source: PathBuf,
    temp: Option<TempPath>,
}

impl PickedImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let source = path.into();
        Self {
            image: ImageRef::new(source.clone()),
            source,
            temp: None,
        }
    }

    fn edited(source: PathBuf, temp: TempPath) -> Self {
        Self {
            image: ImageRef::new(temp.to_path_buf()),
            source,
            temp: Some(temp),
        }
    }

    pub fn is_edited(&self) -> bool {
        self.temp.is_some()
    }
}

#[derive(Debug)]
pub enum PickOutcome {
    Cancelled,
    Picked(PickedImage),
}

pub trait MediaPicker {
    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome>;
}

impl<T: MediaPicker + ?Sized> MediaPicker for Box<T> {
    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome> {
        (**self).pick_image(options)
    }
}

/// コマンドライン引数で渡されたパスをそのまま選ぶ
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MediaPicker for PathPicker {
    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome> {
        if !self.path.is_file() {
            return Err(ScanAiError::FileNotFound(self.path.display().to_string()));
        }
        if !is_image_path(&self.path) {
            return Err(ScanAiError::NotAnImage(self.path.display().to_string()));
        }
        apply_options(&self.path, options).map(PickOutcome::Picked)
    }
}

/// フォルダ内の画像一覧から対話的に選ぶ
pub struct FolderPicker {
    folder: PathBuf,
}

impl FolderPicker {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }
}

impl MediaPicker for FolderPicker {
    fn pick_image(&self, options: &PickerOptions) -> Result<PickOutcome> {
        let images = scan_folder(&self.folder)?;
        if images.is_empty() {
            return Err(ScanAiError::NoImagesFound(self.folder.display().to_string()));
        }

        let names: Vec<&str> = images.iter().map(|e| e.file_name.as_str()).collect();
        let selection = Select::new()
            .with_prompt("MRI画像を選択 (Esc/q: キャンセル)")
            .items(&names)
            .default(0)
            .interact_opt()
            .map_err(|e| ScanAiError::Picker(e.to_string()))?;

        match selection {
            Some(index) => apply_options(&images[index].path, options).map(PickOutcome::Picked),
            None => Ok(PickOutcome::Cancelled),
        }
    }
}

fn apply_options(path: &Path, options: &PickerOptions) -> Result<PickedImage> {
    if options.allows_editing && options.crop == CropMode::Square {
        let temp = crop_square_to_temp(path, options.quality)?;
        return Ok(PickedImage::edited(path.to_path_buf(), temp));
    }
    Ok(PickedImage::new(path))
}
