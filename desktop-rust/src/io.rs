use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use image::ImageReader;
use scan_ai_common::Prediction;

use crate::model::Preview;

pub const PREVIEW_SIZE: u32 = 250;

/// `scan-ai classify <image> --json` を実行して結果を読む
pub fn run_classify(cli: &Path, image: &Path, crop_square: bool) -> Result<Prediction> {
    let mut command = Command::new(cli);
    command.arg("classify").arg(image).arg("--json");
    if crop_square {
        command.args(["--crop", "square"]);
    }

    let out = command
        .output()
        .with_context(|| format!("run {}", cli.display()))?;
    if !out.status.success() {
        bail!("{}", failure_reason(&String::from_utf8_lossy(&out.stderr)));
    }
    parse_cli_output(&String::from_utf8_lossy(&out.stdout))
}

/// stderrの最後の非空行（CLIが理由を最後に出す）
pub fn failure_reason(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("classify failed")
        .to_string()
}

/// stdoutの最後の非空行をPredictionとしてパース
pub fn parse_cli_output(stdout: &str) -> Result<Prediction> {
    let line = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .context("empty output")?;
    let prediction: Prediction =
        serde_json::from_str(line.trim()).with_context(|| format!("parse {line}"))?;
    Ok(prediction)
}

pub fn load_preview(path: &Path) -> Result<Preview> {
    let image = ImageReader::open(path)
        .with_context(|| format!("open {}", path.display()))?
        .decode()
        .with_context(|| format!("decode {}", path.display()))?;
    let thumb = image.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE);
    Ok(Preview {
        path: path.to_path_buf(),
        size: [thumb.width() as usize, thumb.height() as usize],
        pixels: thumb.to_rgba8().into_raw(),
    })
}

pub fn resolve_cli_binary() -> PathBuf {
    let name = cli_binary_name();
    let exe = std::env::current_exe().ok();
    if let Some(base_dir) = exe.as_ref().and_then(|p| p.parent()) {
        let local = base_dir.join(&name);
        if local.exists() {
            return local;
        }
        if let Some(target_dir) = base_dir.parent() {
            let sibling = target_dir.join("debug").join(&name);
            if sibling.exists() {
                return sibling;
            }
            let release = target_dir.join("release").join(&name);
            if release.exists() {
                return release;
            }
        }
    }
    PathBuf::from("scan-ai")
}

fn cli_binary_name() -> String {
    format!("scan-ai{}", std::env::consts::EXE_SUFFIX)
}
