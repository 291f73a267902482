//! 錯誤分類
//!
//! 核心模組回傳帶類別的錯誤，選單與 CLI 邊界再轉成 anyhow

use crate::client::JobStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoGenError {
    #[error("缺少必要設定: {0}")]
    Configuration(String),

    #[error("遠端服務請求失敗: {0}")]
    RemoteService(String),

    #[error("生成任務未完成（狀態: {status}）: {detail}")]
    JobDidNotComplete { status: JobStatus, detail: String },

    #[error("任務尚未完成，無法下載（狀態: {0}）")]
    NotReady(JobStatus),

    #[error("至少需要兩個輸入檔案，目前只有 {0} 個")]
    InsufficientInputs(usize),

    #[error("找不到輸入檔案: {0}")]
    InputNotFound(PathBuf),

    #[error("輸入路徑不是檔案: {0}")]
    InputNotAFile(PathBuf),

    #[error("找不到 {0} 執行檔，請安裝或設定 FFMPEG_DIR")]
    ToolNotFound(String),

    #[error("轉碼工具執行失敗（exit code {code:?}）: {stderr}")]
    TranscodeFailed { code: Option<i32>, stderr: String },

    #[error("找不到來源影片: {0}")]
    SourceNotFound(PathBuf),

    #[error("影片沒有任何可解碼的畫格: {0}")]
    EmptyVideo(PathBuf),

    #[error("畫格寫入失敗: {0}")]
    WriteFailed(String),

    #[error("操作已中斷，遠端任務不受影響")]
    Interrupted,

    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VideoGenError>;
