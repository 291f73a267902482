use crate::error::{Result, VideoGenError};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 已驗證的拼接清單，順序與呼叫端給的完全一致
#[derive(Debug, Clone)]
pub struct ConcatManifest {
    entries: Vec<PathBuf>,
}

impl ConcatManifest {
    /// 驗證輸入清單：至少兩個、每個都存在且是一般檔案，
    /// 通過後解析成絕對路徑
    pub fn validate(paths: &[PathBuf]) -> Result<Self> {
        if paths.len() < 2 {
            return Err(VideoGenError::InsufficientInputs(paths.len()));
        }

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            if !path.exists() {
                return Err(VideoGenError::InputNotFound(path.clone()));
            }
            if !path.is_file() {
                return Err(VideoGenError::InputNotAFile(path.clone()));
            }
            entries.push(fs::canonicalize(path)?);
        }

        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// 寫出 concat demuxer 的清單檔，一行一個輸入，順序不變
    ///
    /// 清單檔放在暫存資料夾，由回傳的 guard 負責刪除
    pub fn materialize(&self) -> Result<ManifestFile> {
        let path = env::temp_dir().join(format!("concat_list_{}.txt", Uuid::new_v4()));

        let mut content = String::new();
        for entry in &self.entries {
            content.push_str(&format!("file '{}'\n", escape_single_quotes(entry)));
        }

        fs::write(&path, content)?;
        Ok(ManifestFile { path })
    }
}

/// 暫存清單檔，離開作用域時一定刪除（成功或失敗都一樣）
#[derive(Debug)]
pub struct ManifestFile {
    path: PathBuf,
}

impl ManifestFile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ManifestFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// concat demuxer 的引號規則：單引號包住整個路徑，
/// 路徑內的 `'` 換成 `'\''`
fn escape_single_quotes(path: &Path) -> String {
    path.display().to_string().replace('\'', "'\\''")
}
