use crate::config::types::{
    DEFAULT_LANGUAGE, DEFAULT_MODEL, DEFAULT_OUTPUT_DIR, DEFAULT_POLL_INTERVAL_SECS, Settings,
};
use log::warn;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

impl Settings {
    /// 從環境變數載入設定，缺少的欄位使用預設值
    ///
    /// 會先嘗試讀取工作目錄下的 `.env`，沒有也沒關係
    #[must_use]
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let poll_interval = env::var("SORA_POLL_INTERVAL")
            .ok()
            .map(|raw| match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!("SORA_POLL_INTERVAL 不是有效的秒數: {raw}，改用預設值");
                    DEFAULT_POLL_INTERVAL_SECS
                }
            })
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        Self {
            api_key: env::var("AZURE_OPENAI_API_KEY").ok(),
            base_url: env::var("AZURE_OPENAI_BASE_URL").ok(),
            model: env::var("SORA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            poll_interval: Duration::from_secs(poll_interval),
            output_dir: env::var("SORA_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            language: env::var("APP_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
        }
    }
}
