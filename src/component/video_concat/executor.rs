use super::manifest::{ConcatManifest, ManifestFile};
use crate::error::{Result, VideoGenError};
use crate::tools::{ensure_parent_directory, locate_ffmpeg};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 驗證輸入並以 stream copy 拼接成單一影片
pub fn concat_videos(inputs: &[PathBuf], output_path: &Path) -> Result<()> {
    let manifest = ConcatManifest::validate(inputs)?;
    let list = manifest.materialize()?;
    run_concat(list, output_path)
}

/// 以 concat demuxer 執行拼接，不重新編碼
///
/// 清單檔由 guard 持有，程序結束後（不論成敗）都會刪除
pub fn run_concat(list: ManifestFile, output_path: &Path) -> Result<()> {
    let ffmpeg = locate_ffmpeg()?;
    ensure_parent_directory(output_path)?;

    debug!(
        "執行拼接: {} -> {}",
        list.path().display(),
        output_path.display()
    );

    let output = Command::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "concat", "-safe", "0", "-i"])
        .arg(list.path())
        .args(["-c", "copy"])
        .arg(output_path)
        .output()?;

    drop(list);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoGenError::TranscodeFailed {
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    info!("拼接完成: {}", output_path.display());
    Ok(())
}
