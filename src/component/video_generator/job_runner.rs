use crate::client::{CreateVideoRequest, JobStatus, VideoJob, VideoService};
use crate::error::{Result, VideoGenError};
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// 任務驅動器的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Submitted,
    Polling,
    Completed,
    Failed,
    Cancelled,
}

/// 單一生成任務的狀態機
///
/// 送出後反覆查詢狀態，queued / in_progress 期間以固定間隔睡眠，
/// 這是整個流程唯一的等待點；到達終態後不再輪詢。
/// 睡眠函式可注入，測試用零延遲的替身計算睡眠次數
pub struct JobRunner<C: VideoService> {
    client: C,
    poll_interval: Duration,
    shutdown_signal: Arc<AtomicBool>,
    sleeper: Box<dyn FnMut(Duration)>,
    state: JobState,
}

impl<C: VideoService> JobRunner<C> {
    pub fn new(client: C, poll_interval: Duration, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            client,
            poll_interval,
            shutdown_signal,
            sleeper: Box::new(thread::sleep),
            state: JobState::Submitted,
        }
    }

    #[must_use]
    pub fn with_sleeper(mut self, sleeper: impl FnMut(Duration) + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    #[must_use]
    pub const fn state(&self) -> JobState {
        self.state
    }

    /// 驅動任務從送出到終態；completed 時把成品下載到 `output_path`
    ///
    /// 遠端失敗或取消不會自動重送，呼叫端要重試就得重新送出，
    /// 產生全新的任務識別碼
    pub fn run(&mut self, request: &CreateVideoRequest, output_path: &Path) -> Result<VideoJob> {
        let mut job = self.client.submit(request)?;
        self.state = JobState::Submitted;
        info!("生成任務 {} 已送出", job.id);

        loop {
            match job.status {
                JobStatus::Completed => {
                    self.state = JobState::Completed;
                    self.client.download(&job, output_path)?;
                    return Ok(job);
                }
                JobStatus::Failed => {
                    self.state = JobState::Failed;
                    return Err(VideoGenError::JobDidNotComplete {
                        status: job.status,
                        detail: job.failure_detail(),
                    });
                }
                JobStatus::Cancelled => {
                    self.state = JobState::Cancelled;
                    return Err(VideoGenError::JobDidNotComplete {
                        status: job.status,
                        detail: job.failure_detail(),
                    });
                }
                JobStatus::Queued | JobStatus::InProgress => {
                    // Ctrl-C 時放棄輪詢，遠端任務的生命週期不受影響
                    if self.shutdown_signal.load(Ordering::SeqCst) {
                        self.state = JobState::Cancelled;
                        return Err(VideoGenError::Interrupted);
                    }

                    self.state = JobState::Polling;
                    debug!("任務 {} 狀態 {}，{:?} 後再查詢", job.id, job.status, self.poll_interval);
                    (self.sleeper)(self.poll_interval);
                    job = self.client.poll(&job.id)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    /// 依序回覆預先排好的狀態
    struct FakeService {
        responses: RefCell<VecDeque<JobStatus>>,
        polls: Cell<u32>,
        downloads: Cell<u32>,
    }

    impl FakeService {
        fn new(statuses: &[JobStatus]) -> Self {
            Self {
                responses: RefCell::new(statuses.iter().copied().collect()),
                polls: Cell::new(0),
                downloads: Cell::new(0),
            }
        }

        fn next_job(&self) -> VideoJob {
            let status = self
                .responses
                .borrow_mut()
                .pop_front()
                .expect("假服務的狀態序列用完了");
            VideoJob {
                id: "job_fake".to_string(),
                status,
                model: None,
                prompt: None,
                seconds: None,
                size: None,
                failure_reason: Some("fake failure".to_string())
                    .filter(|_| status == JobStatus::Failed),
            }
        }
    }

    impl VideoService for &FakeService {
        fn submit(&self, _request: &CreateVideoRequest) -> Result<VideoJob> {
            Ok(self.next_job())
        }

        fn poll(&self, _job_id: &str) -> Result<VideoJob> {
            self.polls.set(self.polls.get() + 1);
            Ok(self.next_job())
        }

        fn download(&self, job: &VideoJob, dest: &Path) -> Result<()> {
            if job.status != JobStatus::Completed {
                return Err(VideoGenError::NotReady(job.status));
            }
            self.downloads.set(self.downloads.get() + 1);
            fs::write(dest, b"video-bytes")?;
            Ok(())
        }
    }

    fn request() -> CreateVideoRequest {
        CreateVideoRequest {
            model: "sora-2".to_string(),
            prompt: "測試".to_string(),
            seconds: 8,
            size: "1280x720".to_string(),
            input_reference: None,
        }
    }

    fn runner<'a>(
        service: &'a FakeService,
        sleeps: &Rc<Cell<u32>>,
    ) -> JobRunner<&'a FakeService> {
        let counter = Rc::clone(sleeps);
        JobRunner::new(
            service,
            Duration::from_secs(20),
            Arc::new(AtomicBool::new(false)),
        )
        .with_sleeper(move |_| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_two_in_progress_then_completed() {
        let service = FakeService::new(&[
            JobStatus::InProgress,
            JobStatus::InProgress,
            JobStatus::Completed,
        ]);
        let sleeps = Rc::new(Cell::new(0));
        let dir = tempdir().unwrap();
        let output = dir.path().join("video.mp4");

        let mut runner = runner(&service, &sleeps);
        let job = runner.run(&request(), &output).unwrap();

        // 兩次睡眠、每次睡眠後一次查詢、最後一次下載
        assert_eq!(sleeps.get(), 2);
        assert_eq!(service.polls.get(), 2);
        assert_eq!(service.downloads.get(), 1);
        assert_eq!(runner.state(), JobState::Completed);
        assert_eq!(job.status, JobStatus::Completed);
        assert!(output.exists());
    }

    #[test]
    fn test_completed_immediately_skips_polling() {
        let service = FakeService::new(&[JobStatus::Completed]);
        let sleeps = Rc::new(Cell::new(0));
        let dir = tempdir().unwrap();
        let output = dir.path().join("video.mp4");

        let mut runner = runner(&service, &sleeps);
        runner.run(&request(), &output).unwrap();

        assert_eq!(sleeps.get(), 0);
        assert_eq!(service.polls.get(), 0);
        assert_eq!(service.downloads.get(), 1);
    }

    #[test]
    fn test_failed_on_first_poll() {
        let service = FakeService::new(&[JobStatus::Queued, JobStatus::Failed]);
        let sleeps = Rc::new(Cell::new(0));
        let dir = tempdir().unwrap();
        let output = dir.path().join("video.mp4");

        let mut runner = runner(&service, &sleeps);
        let err = runner.run(&request(), &output).unwrap_err();

        match err {
            VideoGenError::JobDidNotComplete { status, detail } => {
                assert_eq!(status, JobStatus::Failed);
                assert_eq!(detail, "fake failure");
            }
            other => panic!("預期 JobDidNotComplete，實際為 {other:?}"),
        }
        assert_eq!(runner.state(), JobState::Failed);
        // 失敗後不能嘗試下載
        assert_eq!(service.downloads.get(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_cancelled_remotely() {
        let service = FakeService::new(&[JobStatus::InProgress, JobStatus::Cancelled]);
        let sleeps = Rc::new(Cell::new(0));
        let dir = tempdir().unwrap();
        let output = dir.path().join("video.mp4");

        let mut runner = runner(&service, &sleeps);
        let err = runner.run(&request(), &output).unwrap_err();

        assert!(matches!(err, VideoGenError::JobDidNotComplete { .. }));
        assert_eq!(runner.state(), JobState::Cancelled);
        assert_eq!(service.downloads.get(), 0);
    }

    #[test]
    fn test_local_interrupt_abandons_polling() {
        let service = FakeService::new(&[JobStatus::Queued]);
        let sleeps = Rc::new(Cell::new(0));
        let dir = tempdir().unwrap();
        let output = dir.path().join("video.mp4");

        let counter = Rc::clone(&sleeps);
        let mut runner = JobRunner::new(
            &service,
            Duration::from_secs(20),
            Arc::new(AtomicBool::new(true)),
        )
        .with_sleeper(move |_| counter.set(counter.get() + 1));

        let err = runner.run(&request(), &output).unwrap_err();

        assert!(matches!(err, VideoGenError::Interrupted));
        assert_eq!(runner.state(), JobState::Cancelled);
        // 中斷時不再睡眠也不再查詢
        assert_eq!(sleeps.get(), 0);
        assert_eq!(service.polls.get(), 0);
    }
}
