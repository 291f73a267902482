use crate::error::{Result, VideoGenError};
use std::fs;
use std::path::Path;

/// 確認輸入路徑存在且是一般檔案
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(VideoGenError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(VideoGenError::InputNotAFile(path.to_path_buf()));
    }
    Ok(())
}

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(VideoGenError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(VideoGenError::InputNotAFile(path.to_path_buf()));
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// 建立目標檔案的上層資料夾
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_directory_exists(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_input_file_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.mp4");
        let err = validate_input_file(&missing).unwrap_err();
        assert!(matches!(err, VideoGenError::InputNotFound(_)));
    }

    #[test]
    fn test_validate_input_file_directory() {
        let dir = tempdir().unwrap();
        let err = validate_input_file(dir.path()).unwrap_err();
        assert!(matches!(err, VideoGenError::InputNotAFile(_)));
    }

    #[test]
    fn test_validate_input_file_ok() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp4");
        fs::write(&file, b"x").unwrap();
        assert!(validate_input_file(&file).is_ok());
    }

    #[test]
    fn test_ensure_parent_directory_creates_chain() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/c/video.mp4");
        ensure_parent_directory(&target).unwrap();
        assert!(target.parent().unwrap().is_dir());
    }

    #[test]
    fn test_ensure_parent_directory_bare_filename() {
        assert!(ensure_parent_directory(Path::new("video.mp4")).is_ok());
    }
}
