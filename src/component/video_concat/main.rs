use super::executor::concat_videos;
use crate::config::Settings;
use crate::tools::{get_video_info, scan_video_files};
use anyhow::{Result, bail};
use chrono::Local;
use console::style;
use dialoguer::MultiSelect;
use dialoguer::theme::ColorfulTheme;
use log::info;
use std::path::PathBuf;

/// 影片拼接元件
///
/// 從輸出資料夾挑選多部影片，依清單順序以 stream copy 拼接
pub struct VideoConcat {
    settings: Settings,
}

impl VideoConcat {
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 影片拼接 ===").cyan().bold());

        let videos = scan_video_files(&self.settings.output_dir)?;
        if videos.len() < 2 {
            println!(
                "{}",
                style(format!(
                    "{} 內的影片不足兩部，請先生成影片",
                    self.settings.output_dir.display()
                ))
                .yellow()
            );
            return Ok(());
        }

        let items: Vec<String> = videos
            .iter()
            .map(|v| {
                let size_mb = v.size as f64 / 1024.0 / 1024.0;
                format!("{} ({size_mb:.2} MB)", v.path.display())
            })
            .collect();

        let selection = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("選擇要拼接的影片（依列出順序拼接）")
            .items(&items)
            .interact()?;

        if selection.len() < 2 {
            bail!("至少要選擇兩部影片");
        }

        let inputs: Vec<PathBuf> = selection.iter().map(|&i| videos[i].path.clone()).collect();

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let output_path = self.settings.output_dir.join(format!("concat_{timestamp}.mp4"));

        println!("{}", style("拼接中...").dim());
        concat_videos(&inputs, &output_path)?;

        match get_video_info(&output_path) {
            Ok(video_info) => println!(
                "{} {}（{:.1} 秒）",
                style("拼接完成:").green().bold(),
                output_path.display(),
                video_info.duration_seconds
            ),
            Err(_) => println!(
                "{} {}",
                style("拼接完成:").green().bold(),
                output_path.display()
            ),
        }

        info!("影片拼接完成: {}", output_path.display());
        Ok(())
    }
}
