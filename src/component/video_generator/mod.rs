//! 影片生成元件
//!
//! 送出遠端生成任務、輪詢到終態、下載成品

mod job_runner;
mod main;

pub use job_runner::{JobRunner, JobState};
pub use main::{DEFAULT_SECONDS, DEFAULT_SIZE, VideoGenerator, is_valid_size, run_generation};
