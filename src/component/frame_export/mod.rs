//! 結尾畫格擷取元件
//!
//! 兩層策略：ffmpeg 結尾快轉優先，失敗時改用逐格計數的精準路徑

mod main;
mod strategies;

pub use main::FrameExporter;
pub use strategies::{ExtractionStrategy, extract_last_frame};
