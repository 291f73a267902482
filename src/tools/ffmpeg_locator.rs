//! 轉碼工具探索
//!
//! 依序嘗試：系統 PATH 搜尋 → 內建執行檔位置，
//! 其他元件不需要知道工具是怎麼安裝的

use crate::error::{Result, VideoGenError};
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

pub fn locate_ffmpeg() -> Result<PathBuf> {
    locate("ffmpeg")
}

pub fn locate_ffprobe() -> Result<PathBuf> {
    locate("ffprobe")
}

/// 找出工具的可執行檔路徑，兩個探索策略都落空時回報 `ToolNotFound`
pub fn locate(tool: &str) -> Result<PathBuf> {
    let strategies: [(&str, fn(&str) -> Option<PathBuf>); 2] =
        [("path", find_in_path), ("bundled", find_bundled)];

    for (name, strategy) in strategies {
        if let Some(found) = strategy(tool) {
            debug!("以 {name} 策略找到 {tool}: {}", found.display());
            return Ok(found);
        }
    }

    Err(VideoGenError::ToolNotFound(tool.to_string()))
}

fn find_in_path(tool: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    search_dirs(tool, env::split_paths(&paths))
}

/// 在給定的資料夾清單中尋找可執行檔，依序回傳第一個命中
fn search_dirs(tool: &str, dirs: impl Iterator<Item = PathBuf>) -> Option<PathBuf> {
    let exe = exe_name(tool);
    dirs.map(|dir| dir.join(&exe)).find(|c| is_executable(c))
}

/// 內建執行檔：`FFMPEG_DIR` 環境變數優先，再找程式旁的 bin 資料夾
fn find_bundled(tool: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os("FFMPEG_DIR") {
        let candidate = PathBuf::from(dir).join(exe_name(tool));
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }

    let current_exe = env::current_exe().ok()?;
    let candidate = current_exe.parent()?.join("bin").join(exe_name(tool));
    is_executable(&candidate).then_some(candidate)
}

fn exe_name(tool: &str) -> String {
    if cfg!(windows) {
        format!("{tool}.exe")
    } else {
        tool.to_string()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_search_dirs_first_hit_wins() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        make_executable(&first.path().join("ffmpeg"));
        make_executable(&second.path().join("ffmpeg"));

        let found = search_dirs(
            "ffmpeg",
            [first.path().to_path_buf(), second.path().to_path_buf()].into_iter(),
        )
        .unwrap();
        assert_eq!(found, first.path().join("ffmpeg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_search_dirs_skips_non_executable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ffmpeg"), b"not executable").unwrap();

        assert!(search_dirs("ffmpeg", [dir.path().to_path_buf()].into_iter()).is_none());
    }

    #[test]
    fn test_search_dirs_empty() {
        assert!(search_dirs("ffmpeg", std::iter::empty()).is_none());
    }
}
