use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 註冊 Ctrl-C 旗標
///
/// 輪詢迴圈在每次睡眠前檢查這個旗標，放棄本地等待，
/// 遠端任務不會被取消
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，將在下次輪詢前停止...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}
