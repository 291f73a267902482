use super::job_runner::JobRunner;
use crate::client::{CreateVideoRequest, SoraClient, VideoJob};
use crate::config::Settings;
use anyhow::Result;
use chrono::Local;
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// 預設生成長度（秒）
pub const DEFAULT_SECONDS: u32 = 8;
/// 預設解析度
pub const DEFAULT_SIZE: &str = "1280x720";

static SIZE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,4}x\d{2,4}$").expect("Invalid size regex"));

/// 影片生成元件
///
/// 互動式輸入描述與參數，送出遠端任務並等待成品下載
pub struct VideoGenerator {
    settings: Settings,
    shutdown_signal: Arc<AtomicBool>,
}

impl VideoGenerator {
    pub const fn new(settings: Settings, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            settings,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 影片生成 ===").cyan().bold());

        let prompt: String = Input::new()
            .with_prompt("請輸入影片描述")
            .validate_with(|text: &String| {
                if text.trim().is_empty() {
                    Err("影片描述不能是空的")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let seconds: u32 = Input::new()
            .with_prompt("影片長度（秒）")
            .default(DEFAULT_SECONDS)
            .interact_text()?;

        let size: String = Input::new()
            .with_prompt("解析度")
            .default(DEFAULT_SIZE.to_string())
            .validate_with(|text: &String| {
                if is_valid_size(text) {
                    Ok(())
                } else {
                    Err("解析度格式必須是 WIDTHxHEIGHT，例如 1280x720")
                }
            })
            .interact_text()?;

        let reference: String = Input::new()
            .with_prompt("參考素材路徑（可留空）")
            .allow_empty(true)
            .interact_text()?;
        let input_reference = {
            let trimmed = reference.trim();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        };

        let request = CreateVideoRequest {
            model: self.settings.model.clone(),
            prompt: prompt.trim().to_string(),
            seconds,
            size,
            input_reference,
        };

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let output_path = self
            .settings
            .output_dir
            .join(timestamp.to_string())
            .join("video.mp4");

        let job = run_generation(
            &self.settings,
            Arc::clone(&self.shutdown_signal),
            &request,
            &output_path,
        )?;

        println!(
            "{} {}",
            style("影片生成成功:").green().bold(),
            output_path.display()
        );
        info!("任務 {} 完成，輸出 {}", job.id, output_path.display());
        Ok(())
    }
}

/// 送出生成請求並等到成品落地，輪詢期間顯示轉圈動畫
pub fn run_generation(
    settings: &Settings,
    shutdown_signal: Arc<AtomicBool>,
    request: &CreateVideoRequest,
    output_path: &Path,
) -> crate::error::Result<VideoJob> {
    let client = SoraClient::from_settings(settings)?;
    let mut runner = JobRunner::new(client, settings.poll_interval, shutdown_signal);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress bar template"),
    );
    spinner.set_message("等待遠端生成中...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = runner.run(request, output_path);

    match &result {
        Ok(_) => spinner.finish_and_clear(),
        Err(_) => spinner.abandon_with_message("生成未完成"),
    }

    result
}

/// 解析度字串必須是 WIDTHxHEIGHT
#[must_use]
pub fn is_valid_size(size: &str) -> bool {
    SIZE_FORMAT.is_match(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_format() {
        assert!(is_valid_size("1280x720"));
        assert!(is_valid_size("720x1280"));
        assert!(!is_valid_size("1280×720"));
        assert!(!is_valid_size("1280 x 720"));
        assert!(!is_valid_size("wide"));
        assert!(!is_valid_size(""));
    }
}
