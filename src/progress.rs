// src/progress.rs

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// 下载循环向界面推送进度的接口，每个数据块调用一次。
pub trait ProgressSink {
    fn is_cancelled(&self) -> bool;
    fn update_progress(&self, value: f64);
    fn update_message(&self, text: &str);
}

/// 取消信号。Ctrl+C 处理器和进度对话框共享同一个实例。
///
/// 只有在进度对话框打开（armed）期间，Ctrl+C 才被当作"取消下载"；
/// 其余时候由调用方决定如何处理（通常是直接退出进程）。
#[derive(Clone, Default)]
pub struct CancelSignal {
    requested: Arc<AtomicBool>,
    armed: Arc<AtomicBool>,
}

impl CancelSignal {
    /// 请求取消。返回 `false` 表示当前没有可取消的下载。
    pub fn request(&self) -> bool {
        if !self.armed.load(Ordering::SeqCst) {
            return false;
        }
        self.requested.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    fn arm(&self) {
        self.requested.store(false, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
    }

    fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

/// 下载进度"对话框"：标题、一行消息、0-100 的确定进度条以及取消提示。
pub struct ProgressDialog {
    pbar: ProgressBar,
    cancel: CancelSignal,
    closed: AtomicBool,
}

// 进度条内部按千分位计数，保留一位小数的百分比精度
const BAR_SCALE: f64 = 10.0;

impl ProgressDialog {
    pub fn new(title: &str, message: &str, cancel_label: &str, cancel: CancelSignal) -> Self {
        let pbar = ProgressBar::new((100.0 * BAR_SCALE) as u64);
        Self::with_bar(pbar, title, message, cancel_label, cancel)
    }

    /// 不在终端绘制的对话框，行为与正常对话框一致
    pub fn hidden(title: &str, message: &str, cancel: CancelSignal) -> Self {
        let pbar = ProgressBar::with_draw_target(
            Some((100.0 * BAR_SCALE) as u64),
            ProgressDrawTarget::hidden(),
        );
        Self::with_bar(pbar, title, message, "", cancel)
    }

    fn with_bar(
        pbar: ProgressBar,
        title: &str,
        message: &str,
        cancel_label: &str,
        cancel: CancelSignal,
    ) -> Self {
        let template = format!(
            "{{prefix:.bold.cyan}} {{msg}}\n  [{{bar:40.cyan/blue}}]  [Ctrl+C] {}",
            cancel_label.replace('{', "{{").replace('}', "}}")
        );
        if let Ok(style) = ProgressStyle::with_template(&template) {
            pbar.set_style(style.progress_chars("#>-"));
        }
        pbar.set_prefix(title.to_string());
        pbar.set_message(message.to_string());
        cancel.arm();
        debug!("打开进度对话框: {}", title);
        Self {
            pbar,
            cancel,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// 取消下载并关闭对话框。文件句柄由下载循环持有，
    /// 它在下一个数据块之前看到取消标志后自行关闭并删除文件。
    pub fn cancel(&self) {
        if self.cancel.request() {
            info!("用户取消下载");
        }
        self.close();
    }

    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cancel.disarm();
        self.pbar.finish_and_clear();
    }

    /// 关闭对话框，但把最后一条消息留在终端上
    pub fn finish(&self, message: &str) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cancel.disarm();
        self.pbar.finish_with_message(message.to_string());
    }

    pub fn position(&self) -> u64 {
        self.pbar.position()
    }

    pub fn message(&self) -> String {
        self.pbar.message()
    }
}

impl ProgressSink for ProgressDialog {
    fn is_cancelled(&self) -> bool {
        self.cancel.is_requested()
    }

    fn update_progress(&self, value: f64) {
        if self.is_cancelled() || self.is_closed() {
            return;
        }
        let clamped = value.clamp(0.0, 100.0);
        self.pbar.set_position((clamped * BAR_SCALE).round() as u64);
    }

    fn update_message(&self, text: &str) {
        if self.is_cancelled() || self.is_closed() {
            return;
        }
        self.pbar.set_message(text.to_string());
    }
}

impl Drop for ProgressDialog {
    fn drop(&mut self) {
        self.close();
    }
}
