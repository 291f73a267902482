use crate::error::{Result, VideoGenError};
use std::path::PathBuf;
use std::time::Duration;

/// 預設生成模型
pub const DEFAULT_MODEL: &str = "sora-2";
/// 預設輪詢間隔（秒）
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;
/// 預設輸出資料夾
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// 預設介面語言
pub const DEFAULT_LANGUAGE: &str = "zh-TW";

/// 程式設定
///
/// 啟動時從環境變數讀取一次，之後以值傳遞給各元件，
/// 不使用全域狀態，測試可以逐一注入
#[derive(Debug, Clone)]
pub struct Settings {
    /// `AZURE_OPENAI_API_KEY`
    pub api_key: Option<String>,
    /// `AZURE_OPENAI_BASE_URL`
    pub base_url: Option<String>,
    /// `SORA_MODEL`，預設 `sora-2`
    pub model: String,
    /// `SORA_POLL_INTERVAL`，預設 20 秒
    pub poll_interval: Duration,
    /// `SORA_OUTPUT_DIR`，預設 `outputs`
    pub output_dir: PathBuf,
    /// `APP_LANGUAGE`，預設 `zh-TW`
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| VideoGenError::Configuration("AZURE_OPENAI_API_KEY".to_string()))
    }

    pub fn require_base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| VideoGenError::Configuration("AZURE_OPENAI_BASE_URL".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model, "sora-2");
        assert_eq!(settings.poll_interval, Duration::from_secs(20));
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_require_api_key_missing() {
        let settings = Settings::default();
        let err = settings.require_api_key().unwrap_err();
        assert!(matches!(err, VideoGenError::Configuration(_)));
    }

    #[test]
    fn test_require_api_key_empty_string() {
        let settings = Settings {
            api_key: Some(String::new()),
            ..Settings::default()
        };
        assert!(settings.require_api_key().is_err());
        assert!(!settings.has_api_key());
    }

    #[test]
    fn test_require_base_url_present() {
        let settings = Settings {
            base_url: Some("https://example.openai.azure.com/openai/v1".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            settings.require_base_url().unwrap(),
            "https://example.openai.azure.com/openai/v1"
        );
    }
}
