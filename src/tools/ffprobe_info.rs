use crate::error::{Result, VideoGenError};
use crate::tools::ffmpeg_locator::locate_ffprobe;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    nb_read_frames: Option<String>,
}

fn probe_error(detail: String) -> VideoGenError {
    VideoGenError::TranscodeFailed {
        code: None,
        stderr: detail,
    }
}

fn run_ffprobe(args: &[&str], path: &Path) -> Result<FfprobeOutput> {
    let ffprobe = locate_ffprobe()?;

    let output = Command::new(ffprobe).args(args).arg(path).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoGenError::TranscodeFailed {
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).map_err(|e| probe_error(format!("無法解析 ffprobe 輸出: {e}")))
}

/// 使用 ffprobe 取得影片資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let probe = run_ffprobe(
        &[
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ],
        path,
    )?;

    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| probe_error(format!("找不到視訊串流: {}", path.display())))?;

    let width = video_stream
        .width
        .ok_or_else(|| probe_error("無法取得影片寬度".to_string()))?;
    let height = video_stream
        .height
        .ok_or_else(|| probe_error("無法取得影片高度".to_string()))?;

    // 影片長度優先從 format 取，其次從 stream
    let duration_seconds = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| probe_error("無法取得影片長度".to_string()))?;

    Ok(VideoInfo {
        duration_seconds,
        width,
        height,
    })
}

/// 實際解碼計算影片的總畫格數
///
/// `-count_frames` 會逐格解碼，速度慢但結果精準
pub fn count_video_frames(path: &Path) -> Result<u64> {
    let probe = run_ffprobe(
        &[
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-select_streams",
            "v:0",
            "-count_frames",
            "-show_streams",
        ],
        path,
    )?;

    let frames = probe
        .streams
        .as_ref()
        .and_then(|streams| streams.first())
        .and_then(|s| s.nb_read_frames.as_ref())
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(|| probe_error(format!("無法取得畫格數: {}", path.display())))?;

    Ok(frames)
}
