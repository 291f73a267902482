//! 命令列介面
//!
//! 不帶子命令時進入互動選單；帶子命令時直接執行並以
//! 非零代碼結束失敗的操作

use crate::client::CreateVideoRequest;
use crate::component::frame_export::extract_last_frame;
use crate::component::video_concat::concat_videos;
use crate::component::video_generator::{
    DEFAULT_SECONDS, DEFAULT_SIZE, is_valid_size, run_generation,
};
use crate::config::Settings;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

#[derive(Parser)]
#[command(name = "sora_video_gen", version, about = "Sora 影片生成與後製工具")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 依文字描述生成影片
    Generate {
        /// 影片描述
        prompt: String,
        /// 輸出影片路徑
        output: PathBuf,
        /// 影片長度（秒）
        #[arg(long, default_value_t = DEFAULT_SECONDS)]
        seconds: u32,
        /// 解析度，格式 WIDTHxHEIGHT
        #[arg(long, default_value = DEFAULT_SIZE)]
        size: String,
        /// 參考素材（圖片或影片）
        #[arg(long)]
        reference: Option<PathBuf>,
        /// 生成模型，未指定時使用 SORA_MODEL
        #[arg(long)]
        model: Option<String>,
    },
    /// 依清單順序拼接多部影片（stream copy，不重新編碼）
    Concat {
        /// 輸出影片路徑
        output: PathBuf,
        /// 輸入影片，至少兩個，依此順序拼接
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,
    },
    /// 擷取影片最後一個可解碼畫格存成圖片
    LastFrame {
        /// 來源影片
        input: PathBuf,
        /// 輸出圖片
        output: PathBuf,
    },
}

pub fn run_command(
    command: Commands,
    settings: &Settings,
    shutdown_signal: &Arc<AtomicBool>,
) -> Result<()> {
    match command {
        Commands::Generate {
            prompt,
            output,
            seconds,
            size,
            reference,
            model,
        } => {
            if !is_valid_size(&size) {
                bail!("解析度格式必須是 WIDTHxHEIGHT，例如 1280x720");
            }

            let request = CreateVideoRequest {
                model: model.unwrap_or_else(|| settings.model.clone()),
                prompt,
                seconds,
                size,
                input_reference: reference,
            };

            run_generation(settings, Arc::clone(shutdown_signal), &request, &output)?;
            println!(
                "{} {}",
                style("影片生成成功:").green().bold(),
                output.display()
            );
        }
        Commands::Concat { output, inputs } => {
            concat_videos(&inputs, &output)?;
            println!("{} {}", style("拼接完成:").green().bold(), output.display());
        }
        Commands::LastFrame { input, output } => {
            extract_last_frame(&input, &output)?;
            println!("{} {}", style("擷取完成:").green().bold(), output.display());
        }
    }

    Ok(())
}
