use crate::error::{Result, VideoGenError};
use crate::tools::{count_video_frames, ensure_parent_directory, locate_ffmpeg};
use log::{debug, warn};
use std::path::Path;
use std::process::Command;

/// 單一擷取策略：名稱加上一次嘗試
pub struct ExtractionStrategy<'a> {
    pub name: &'static str,
    pub attempt: Box<dyn Fn() -> Result<()> + 'a>,
}

/// 擷取影片的最後一個可解碼畫格存成圖片
///
/// 兩層策略：
/// 1. `sseof`：請 ffmpeg 從結尾前一秒開始解碼，輸出一格，最快
/// 2. `exact-frame`：ffprobe 逐格計數後解碼第 `count-1` 格，精準但慢
///
/// 全部失敗時回傳第一個策略的錯誤，後備策略不會蓋掉主要路徑的失敗原因
pub fn extract_last_frame(src: &Path, dst: &Path) -> Result<()> {
    if !src.exists() {
        return Err(VideoGenError::SourceNotFound(src.to_path_buf()));
    }
    ensure_parent_directory(dst)?;

    let strategies = vec![
        ExtractionStrategy {
            name: "sseof",
            attempt: Box::new(|| extract_with_sseof(src, dst)),
        },
        ExtractionStrategy {
            name: "exact-frame",
            attempt: Box::new(|| extract_exact_frame(src, dst)),
        },
    ];

    run_strategies(strategies)
}

/// 依序嘗試策略，第一個成功就停；全失敗時回傳第一個錯誤
fn run_strategies(strategies: Vec<ExtractionStrategy<'_>>) -> Result<()> {
    let mut first_error = None;

    for strategy in strategies {
        match (strategy.attempt)() {
            Ok(()) => {
                debug!("策略 {} 擷取成功", strategy.name);
                return Ok(());
            }
            Err(e) => {
                warn!("擷取策略 {} 失敗: {e}", strategy.name);
                first_error.get_or_insert(e);
            }
        }
    }

    Err(first_error
        .unwrap_or_else(|| VideoGenError::WriteFailed("沒有可用的擷取策略".to_string())))
}

/// 主要路徑：從結尾往回一秒開始，要求解碼一格
fn extract_with_sseof(src: &Path, dst: &Path) -> Result<()> {
    let ffmpeg = locate_ffmpeg()?;

    let output = Command::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-sseof", "-1", "-i"])
        .arg(src)
        .args(["-frames:v", "1"])
        .arg(dst)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoGenError::TranscodeFailed {
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    // 結尾損毀時 ffmpeg 可能正常結束卻沒寫出任何畫格
    if !dst.exists() {
        return Err(VideoGenError::WriteFailed(format!(
            "工具未寫出畫格檔: {}",
            dst.display()
        )));
    }

    Ok(())
}

/// 後備路徑：逐格計數後解碼最後一格
fn extract_exact_frame(src: &Path, dst: &Path) -> Result<()> {
    let total = count_video_frames(src)?;
    let last_index = last_frame_index(total, src)?;

    let ffmpeg = locate_ffmpeg()?;
    let filter = format!("select=eq(n\\,{last_index})");

    let output = Command::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
        .arg(src)
        .args(["-vf", &filter, "-frames:v", "1"])
        .arg(dst)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoGenError::WriteFailed(stderr.trim().to_string()));
    }

    if !dst.exists() {
        return Err(VideoGenError::WriteFailed(format!(
            "工具未寫出畫格檔: {}",
            dst.display()
        )));
    }

    Ok(())
}

/// 最後一格的索引；零畫格的影片無法擷取
fn last_frame_index(total_frames: u64, src: &Path) -> Result<u64> {
    if total_frames == 0 {
        return Err(VideoGenError::EmptyVideo(src.to_path_buf()));
    }
    Ok(total_frames - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_source_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.mp4");
        let dst = dir.path().join("frame.jpg");

        let err = extract_last_frame(&missing, &dst).unwrap_err();
        assert!(matches!(err, VideoGenError::SourceNotFound(_)));
    }

    #[test]
    fn test_run_strategies_returns_first_error() {
        let strategies = vec![
            ExtractionStrategy {
                name: "primary",
                attempt: Box::new(|| {
                    Err(VideoGenError::TranscodeFailed {
                        code: Some(1),
                        stderr: "seek failed".to_string(),
                    })
                }),
            },
            ExtractionStrategy {
                name: "fallback",
                attempt: Box::new(|| Err(VideoGenError::ToolNotFound("ffprobe".to_string()))),
            },
        ];

        // 後備策略無法執行時，回報的仍然是主要路徑的錯誤
        let err = run_strategies(strategies).unwrap_err();
        match err {
            VideoGenError::TranscodeFailed { code, stderr } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "seek failed");
            }
            other => panic!("預期主要策略的錯誤，實際為 {other:?}"),
        }
    }

    #[test]
    fn test_run_strategies_fallback_recovers() {
        let strategies = vec![
            ExtractionStrategy {
                name: "primary",
                attempt: Box::new(|| {
                    Err(VideoGenError::ToolNotFound("ffmpeg".to_string()))
                }),
            },
            ExtractionStrategy {
                name: "fallback",
                attempt: Box::new(|| Ok(())),
            },
        ];

        assert!(run_strategies(strategies).is_ok());
    }

    #[test]
    fn test_run_strategies_stops_at_first_success() {
        let fallback_calls = Cell::new(0u32);

        let strategies = vec![
            ExtractionStrategy {
                name: "primary",
                attempt: Box::new(|| Ok(())),
            },
            ExtractionStrategy {
                name: "fallback",
                attempt: Box::new(|| {
                    fallback_calls.set(fallback_calls.get() + 1);
                    Ok(())
                }),
            },
        ];

        assert!(run_strategies(strategies).is_ok());
        assert_eq!(fallback_calls.get(), 0);
    }

    #[test]
    fn test_last_frame_index_empty_video() {
        let src = PathBuf::from("/tmp/zero_frames.mp4");
        let err = last_frame_index(0, &src).unwrap_err();
        match err {
            VideoGenError::EmptyVideo(path) => assert_eq!(path, src),
            other => panic!("預期 EmptyVideo，實際為 {other:?}"),
        }
    }

    #[test]
    fn test_last_frame_index() {
        let src = PathBuf::from("/tmp/clip.mp4");
        assert_eq!(last_frame_index(48, &src).unwrap(), 47);
        assert_eq!(last_frame_index(1, &src).unwrap(), 0);
    }
}
