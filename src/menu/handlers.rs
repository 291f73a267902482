use crate::component::{FrameExporter, VideoConcat, VideoGenerator};
use crate::config::Settings;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_video_generator(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    settings: &Settings,
) -> Result<()> {
    let generator = VideoGenerator::new(settings.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = generator.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_video_concat(term: &Term, settings: &Settings) -> Result<()> {
    let concat = VideoConcat::new(settings.clone());

    if let Err(e) = concat.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_frame_exporter(term: &Term) -> Result<()> {
    let exporter = FrameExporter::new();

    if let Err(e) = exporter.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

/// 顯示目前設定，金鑰只顯示有無，不顯示內容
pub fn run_show_config(term: &Term, settings: &Settings) -> Result<()> {
    println!("{}", style(t!("config_view.title")).cyan().bold());
    println!();

    let key_state = if settings.has_api_key() {
        style(t!("config_view.yes")).green()
    } else {
        style(t!("config_view.no")).red()
    };
    println!("  {} {key_state}", t!("config_view.api_key"));

    let base_url = settings
        .base_url
        .clone()
        .unwrap_or_else(|| t!("config_view.not_set").to_string());
    println!("  {} {base_url}", t!("config_view.base_url"));
    println!("  {} {}", t!("config_view.model"), settings.model);
    println!(
        "  {} {}s",
        t!("config_view.poll_interval"),
        settings.poll_interval.as_secs()
    );
    println!(
        "  {} {}",
        t!("config_view.output_dir"),
        settings.output_dir.display()
    );

    pause(term)?;
    Ok(())
}
