use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::path::PathBuf;

/// 遠端生成任務狀態（線上格式為 snake_case）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }

    /// 終態之後不再輪詢
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// 遠端生成任務，只會透過重新查詢服務來更新
#[derive(Debug, Clone, Deserialize)]
pub struct VideoJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub seconds: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl VideoJob {
    /// 伺服器提供的失敗說明，沒有就給個一般性文字
    #[must_use]
    pub fn failure_detail(&self) -> String {
        self.failure_reason
            .clone()
            .unwrap_or_else(|| "遠端服務未提供失敗原因".to_string())
    }
}

/// 建立生成任務的請求參數
#[derive(Debug, Clone)]
pub struct CreateVideoRequest {
    pub model: String,
    pub prompt: String,
    pub seconds: u32,
    pub size: String,
    pub input_reference: Option<PathBuf>,
}

impl CreateVideoRequest {
    /// JSON 請求本體；seconds 依服務要求以字串編碼
    #[must_use]
    pub fn json_body(&self) -> serde_json::Value {
        json!({
            "model": self.model,
            "prompt": self.prompt,
            "seconds": self.seconds.to_string(),
            "size": self.size,
        })
    }
}
