use crate::error::Result;
use crate::tools::path_validator::validate_directory_exists;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 可作為拼接輸入的影片副檔名
const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mov", "webm"];

#[derive(Debug, Clone)]
pub struct VideoFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 遞迴掃描資料夾內的影片檔，依修改時間新到舊排序
pub fn scan_video_files(directory: &Path) -> Result<Vec<VideoFileInfo>> {
    validate_directory_exists(directory)?;

    let mut videos: Vec<(VideoFileInfo, std::time::SystemTime)> = Vec::new();

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }

        if let Ok(metadata) = entry.metadata() {
            let modified = metadata
                .modified()
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH);
            videos.push((
                VideoFileInfo {
                    path: entry.path().to_path_buf(),
                    size: metadata.len(),
                },
                modified,
            ));
        }
    }

    videos.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(videos.into_iter().map(|(info, _)| info).collect())
}

fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == lower)
        })
}
