// src/downloader/cleanup.rs

use log::{debug, warn};
use std::{io::ErrorKind, path::Path, time::Duration};

/// 尽力删除文件。文件可能仍被占用，失败时按固定间隔重试，
/// 用尽次数后放弃并返回 `false`，不向用户报错。文件不存在时直接返回 `true`。
pub async fn safe_remove_file(path: &Path, max_attempts: u32, delay: Duration) -> bool {
    let attempts = max_attempts.max(1);
    for attempt in 1..=attempts {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!("已删除文件: {}", path.display());
                return true;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => return true,
            Err(e) => {
                warn!(
                    "删除文件 '{}' 失败 (第 {}/{} 次): {}",
                    path.display(),
                    attempt,
                    attempts,
                    e
                );
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_missing_file_returns_immediately() {
        let path = std::env::temp_dir().join("updater-cleanup-test-missing.bin");
        let start = Instant::now();
        assert!(safe_remove_file(&path, 5, Duration::from_secs(1)).await);
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_existing_file_is_removed() {
        let path = std::env::temp_dir().join(format!("updater-cleanup-test-{}.bin", std::process::id()));
        std::fs::write(&path, b"partial").unwrap();
        assert!(safe_remove_file(&path, 5, Duration::from_millis(10)).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_gives_up_after_bounded_attempts() {
        // 目录不能被 remove_file 删除，可以模拟"一直删不掉"的文件
        let dir = std::env::temp_dir().join(format!("updater-cleanup-dir-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let start = Instant::now();
        assert!(!safe_remove_file(&dir, 3, Duration::from_millis(20)).await);
        assert!(start.elapsed() >= Duration::from_millis(40));
        std::fs::remove_dir(&dir).unwrap();
    }
}
