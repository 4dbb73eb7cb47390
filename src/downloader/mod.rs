// src/downloader/mod.rs

mod cleanup;
mod state;

pub use cleanup::safe_remove_file;
pub use state::{DownloadState, format_progress};

use crate::{
    UpdateContext,
    error::*,
    i18n::MessageKey,
    progress::ProgressSink,
};
use futures::StreamExt;
use log::{debug, error, info, warn};
use reqwest::{Response, header};
use std::{
    fs::{self, OpenOptions},
    io::Write as IoWrite,
    path::Path,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadStatus {
    Completed,
    Cancelled,
}

/// 把安装包以固定大小的数据块流式写入磁盘，并在每个数据块后推送进度。
pub struct Downloader {
    context: UpdateContext,
}

impl Downloader {
    pub fn new(context: UpdateContext) -> Self {
        Self { context }
    }

    pub async fn download(
        &self,
        url: &str,
        destination: &Path,
        sink: &dyn ProgressSink,
    ) -> AppResult<DownloadStatus> {
        if sink.is_cancelled() {
            return Ok(DownloadStatus::Cancelled);
        }
        info!("开始下载: {} -> {}", url, destination.display());

        let res = self.context.http_client.get(url).await?;
        // 没有声明大小与声明为 0 一样，都视为空文件
        let total_bytes = declared_length(&res).unwrap_or(0);
        debug!("声明的文件大小: {}", total_bytes);
        if total_bytes == 0 {
            error!("远端文件 {} 为空或缺少 content-length", url);
            return Err(AppError::EmptyResource { url: url.to_string() });
        }
        if sink.is_cancelled() {
            return Ok(DownloadStatus::Cancelled);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut state = DownloadState::new(destination, total_bytes);
        let result = self.stream_to_file(res, &mut state, sink).await;

        match result {
            Ok(DownloadStatus::Completed) => {
                info!("下载完成: {} ({} 字节)", destination.display(), state.bytes_downloaded);
                Ok(DownloadStatus::Completed)
            }
            Ok(DownloadStatus::Cancelled) => {
                info!(
                    "下载已取消 ({} / {} 字节)，删除未完成的文件",
                    state.bytes_downloaded, state.total_bytes
                );
                self.remove_partial(destination).await;
                Ok(DownloadStatus::Cancelled)
            }
            Err(e) => {
                error!("下载 '{}' 失败: {}", url, e);
                sink.update_message(self.context.messages.get(MessageKey::CleaningUp));
                self.remove_partial(destination).await;
                Err(e)
            }
        }
    }

    /// 文件句柄只存在于本函数内，任何方式返回时都会先被关闭，
    /// 之后调用方才去删除未完成的文件。
    async fn stream_to_file(
        &self,
        res: Response,
        state: &mut DownloadState,
        sink: &dyn ProgressSink,
    ) -> AppResult<DownloadStatus> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&state.destination)?;

        let chunk_size = self.context.config.chunk_size.max(1);
        let mut stream = res.bytes_stream();
        while let Some(received) = stream.next().await {
            let received = received?;
            for chunk in received.chunks(chunk_size) {
                if sink.is_cancelled() {
                    drop(file);
                    return Ok(DownloadStatus::Cancelled);
                }
                file.write_all(chunk)?;
                state.record(chunk.len());

                let (progress, progress_text) = state.progress();
                sink.update_progress(progress);
                sink.update_message(&self.context.messages.format(
                    MessageKey::Downloading,
                    &[("progress", progress_text.as_str())],
                ));
            }
        }
        file.flush()?;

        if state.bytes_downloaded != state.total_bytes {
            warn!(
                "下载大小与声明不一致 (预期: {}, 实际: {})",
                state.total_bytes, state.bytes_downloaded
            );
        }
        Ok(DownloadStatus::Completed)
    }

    async fn remove_partial(&self, destination: &Path) {
        let config = &self.context.config;
        if !safe_remove_file(destination, config.remove_attempts, config.remove_delay).await {
            warn!("未能删除未完成的文件: {}", destination.display());
        }
    }
}

/// 读取响应头中声明的 `content-length`，没有声明时返回 `None`
fn declared_length(res: &Response) -> Option<u64> {
    res.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
