//! ピッカーの編集機能（中央正方形クロップ）

use crate::error::{Result, ScanAiError};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::Path;
use tempfile::TempPath;

/// 編集内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CropMode {
    /// 編集しない
    #[default]
    None,
    /// 中央を正方形に切り抜く
    Square,
}

/// 中央正方形の切り抜き範囲 (x, y, side)
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// 画像を中央正方形にクロップし、JPEGで一時ファイルに書き出す
///
/// 縮小はしない。`quality` は 0.0〜1.0
pub fn crop_square_to_temp(path: &Path, quality: f32) -> Result<TempPath> {
    let image = image::open(path)
        .map_err(|e| ScanAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let cropped = crop_square(&image);

    let mut file = tempfile::Builder::new()
        .prefix("scan-ai-")
        .suffix(".jpg")
        .tempfile()?;
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut file, jpeg_quality(quality));
        encoder
            .encode_image(&cropped.to_rgb8())
            .map_err(|e| ScanAiError::ImageLoad(e.to_string()))?;
    }

    Ok(file.into_temp_path())
}

fn crop_square(image: &DynamicImage) -> DynamicImage {
    let (x, y, side) = center_square(image.width(), image.height());
    image.crop_imm(x, y, side, side)
}

/// JPEG品質 (1-100)
fn jpeg_quality(quality: f32) -> u8 {
    (quality.clamp(0.01, 1.0) * 100.0).round() as u8
}
