use super::schemas::{CreateVideoRequest, JobStatus, VideoJob};
use crate::config::Settings;
use crate::error::{Result, VideoGenError};
use crate::tools::ensure_parent_directory;
use log::{debug, info};
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Response};
use std::fs;
use std::path::Path;
use std::time::Duration;

const HTTP_TIMEOUT_SECS: u64 = 300;

/// 影片生成服務的抽象介面，測試時以假服務替換
pub trait VideoService {
    fn submit(&self, request: &CreateVideoRequest) -> Result<VideoJob>;
    fn poll(&self, job_id: &str) -> Result<VideoJob>;
    fn download(&self, job: &VideoJob, dest: &Path) -> Result<()>;
}

/// Sora 生成服務客戶端
pub struct SoraClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SoraClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_api_key()?.to_string();
        let base_url = settings.require_base_url()?.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| VideoGenError::RemoteService(format!("無法建立 HTTP 客戶端: {e}")))?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn parse_job(response: Response) -> Result<VideoJob> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VideoGenError::RemoteService(format!(
                "HTTP {status}: {body}"
            )));
        }

        response
            .json()
            .map_err(|e| VideoGenError::RemoteService(format!("無法解析服務回應: {e}")))
    }
}

impl VideoService for SoraClient {
    fn submit(&self, request: &CreateVideoRequest) -> Result<VideoJob> {
        let builder = self
            .http
            .post(self.url("videos"))
            .header("api-key", &self.api_key);

        // 有參考素材時改用 multipart，表單持有檔案握柄，送出後即釋放
        let response = match &request.input_reference {
            Some(reference) => {
                let form = Form::new()
                    .text("model", request.model.clone())
                    .text("prompt", request.prompt.clone())
                    .text("seconds", request.seconds.to_string())
                    .text("size", request.size.clone())
                    .file("input_reference", reference)
                    .map_err(|e| {
                        VideoGenError::RemoteService(format!(
                            "無法讀取參考素材 {}: {e}",
                            reference.display()
                        ))
                    })?;
                builder.multipart(form).send()
            }
            None => builder.json(&request.json_body()).send(),
        }
        .map_err(|e| VideoGenError::RemoteService(format!("建立任務失敗: {e}")))?;

        let job = Self::parse_job(response)?;
        info!("已建立生成任務 {}（狀態: {}）", job.id, job.status);
        Ok(job)
    }

    fn poll(&self, job_id: &str) -> Result<VideoJob> {
        let response = self
            .http
            .get(self.url(&format!("videos/{job_id}")))
            .header("api-key", &self.api_key)
            .send()
            .map_err(|e| VideoGenError::RemoteService(format!("查詢任務狀態失敗: {e}")))?;

        let job = Self::parse_job(response)?;
        debug!("任務 {} 狀態: {}", job.id, job.status);
        Ok(job)
    }

    fn download(&self, job: &VideoJob, dest: &Path) -> Result<()> {
        if job.status != JobStatus::Completed {
            return Err(VideoGenError::NotReady(job.status));
        }

        ensure_parent_directory(dest)?;

        let mut response = self
            .http
            .get(self.url(&format!("videos/{}/content", job.id)))
            .query(&[("variant", "video")])
            .header("api-key", &self.api_key)
            .send()
            .map_err(|e| VideoGenError::RemoteService(format!("下載影片失敗: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(VideoGenError::RemoteService(format!(
                "下載影片失敗 HTTP {status}: {body}"
            )));
        }

        let mut file = fs::File::create(dest)?;
        if let Err(e) = response.copy_to(&mut file) {
            // 不留下寫到一半的檔案
            drop(file);
            let _ = fs::remove_file(dest);
            return Err(VideoGenError::RemoteService(format!(
                "寫入影片內容失敗: {e}"
            )));
        }

        info!("任務 {} 的影片已寫入 {}", job.id, dest.display());
        Ok(())
    }
}
