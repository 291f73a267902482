use super::strategies::extract_last_frame;
use anyhow::Result;
use console::style;
use dialoguer::Input;
use log::info;
use std::path::{Path, PathBuf};

/// 結尾畫格擷取元件
pub struct FrameExporter;

impl FrameExporter {
    pub const fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 擷取結尾畫格 ===").cyan().bold());

        let input: String = Input::new()
            .with_prompt("請輸入來源影片路徑")
            .interact_text()?;
        let src = PathBuf::from(input.trim());

        let default_output = default_frame_path(&src);
        let output: String = Input::new()
            .with_prompt("請輸入輸出圖片路徑")
            .default(default_output.display().to_string())
            .interact_text()?;
        let dst = PathBuf::from(output.trim());

        println!("{}", style("擷取中...").dim());
        extract_last_frame(&src, &dst)?;

        println!("{} {}", style("擷取完成:").green().bold(), dst.display());
        info!("結尾畫格已輸出: {}", dst.display());
        Ok(())
    }
}

impl Default for FrameExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 預設輸出路徑：來源檔名加上 `_last.jpg`
fn default_frame_path(src: &Path) -> PathBuf {
    let stem = src
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let parent = src.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("{stem}_last.jpg"))
}
