use crate::error::{Result, ScanAiError};
use scan_ai_common::IMAGE_EXTENSIONS;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub file_name: String,
}

/// 拡張子が対応画像形式か（大文字小文字を区別しない）
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ImageEntry>> {
    if !folder.is_dir() {
        return Err(ScanAiError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<ImageEntry> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_path(e.path()))
        .map(|e| ImageEntry {
            file_name: e.file_name().to_string_lossy().to_string(),
            path: e.into_path(),
        })
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}
