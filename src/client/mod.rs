//! 遠端影片生成服務客戶端
//!
//! 包裝建立任務、查詢狀態與下載成品三個呼叫

mod main;
mod schemas;

pub use main::{SoraClient, VideoService};
pub use schemas::{CreateVideoRequest, JobStatus, VideoJob};
