// src/downloader/state.rs

use std::path::{Path, PathBuf};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// 单次下载的进度状态，只由下载循环修改。
/// 取消标志不在这里，而是由 [`crate::progress::ProgressSink`] 提供。
#[derive(Debug, Clone)]
pub struct DownloadState {
    pub bytes_downloaded: u64,
    /// 0 表示大小未知
    pub total_bytes: u64,
    pub destination: PathBuf,
}

impl DownloadState {
    pub fn new(destination: &Path, total_bytes: u64) -> Self {
        Self {
            bytes_downloaded: 0,
            total_bytes,
            destination: destination.to_path_buf(),
        }
    }

    pub fn record(&mut self, len: usize) {
        self.bytes_downloaded += len as u64;
    }

    pub fn progress(&self) -> (f64, String) {
        format_progress(self.bytes_downloaded, self.total_bytes)
    }
}

/// 计算进度值与显示文本。
/// 大小已知时返回百分比 (`"NN.N%"`)，未知时进度值为 0，文本为累计兆字节 (`"N.N MB"`)。
pub fn format_progress(downloaded: u64, total: u64) -> (f64, String) {
    if total > 0 {
        let percent = (downloaded as f64 * 100.0) / total as f64;
        (percent, format!("{:.1}%", percent))
    } else {
        (0.0, format!("{:.1} MB", downloaded as f64 / BYTES_PER_MB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress_known_size() {
        assert_eq!(format_progress(0, 200), (0.0, "0.0%".to_string()));
        assert_eq!(format_progress(50, 200), (25.0, "25.0%".to_string()));
        assert_eq!(format_progress(1, 3).1, "33.3%");
        assert_eq!(format_progress(200, 200), (100.0, "100.0%".to_string()));
    }

    #[test]
    fn test_format_progress_unknown_size() {
        assert_eq!(format_progress(0, 0), (0.0, "0.0 MB".to_string()));
        assert_eq!(format_progress(1024 * 1024 * 3 / 2, 0), (0.0, "1.5 MB".to_string()));
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_100() {
        let total = 100_003u64;
        let mut state = DownloadState::new(Path::new("x.exe"), total);
        let mut last = 0.0;
        while state.bytes_downloaded < total {
            let remaining = (total - state.bytes_downloaded) as usize;
            state.record(remaining.min(8192));
            let (value, _) = state.progress();
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 100.0);
    }
}
