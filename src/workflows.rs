// src/workflows.rs

use crate::{
    UpdateContext, UpdateRequest,
    downloader::{DownloadStatus, Downloader},
    error::{AppError, AppResult},
    i18n::{MessageKey, Messages},
    installer::{self, InstallerJob, Spawner},
    ui::Dialogs,
    utils,
    version::{self, UpdateDecision},
};
use log::{error, info, warn};

/// 一次更新流程的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 参数不足，已打印用法
    UsagePrinted,
    UpToDate,
    /// 安装程序已启动，本进程可以退出
    Launched,
    Declined,
    Cancelled,
    /// 错误已通过对话框告知用户
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::UsagePrinted | Outcome::UpToDate | Outcome::Launched => 0,
            Outcome::Declined | Outcome::Cancelled | Outcome::Failed => 1,
        }
    }
}

/// 完整的更新流程：检查版本 -> 用户确认 -> 下载 -> 启动安装程序。
///
/// 检查版本阶段的网络或 JSON 错误以 `Err` 返回，由调用方写到标准错误；
/// 一旦进入对话框阶段，错误都在对话框中展示，并以 [`Outcome::Failed`] 返回。
pub async fn run_update(
    context: &UpdateContext,
    request: &UpdateRequest,
    dialogs: &dyn Dialogs,
    spawner: &dyn Spawner,
) -> AppResult<Outcome> {
    let msgs = context.messages;

    let decision = match version::check_for_update(
        &context.http_client,
        &request.version_check_url,
        &request.current_version,
    )
    .await
    {
        Ok(decision) => decision,
        Err(e) if e.is_format_error() => {
            error!("版本信息格式错误: {}", e);
            dialogs.error(msgs.get(MessageKey::Error), msgs.get(MessageKey::VersionFormatError));
            return Ok(Outcome::Failed);
        }
        Err(e) => return Err(e),
    };

    let (latest_version, download_url) = match decision {
        UpdateDecision::UpToDate => {
            info!("当前版本 {} 已是最新", request.current_version);
            dialogs.info(msgs.get(MessageKey::UpToDate), msgs.get(MessageKey::UpToDateMessage));
            return Ok(Outcome::UpToDate);
        }
        UpdateDecision::UpdateAvailable { latest_version, download_url } => (latest_version, download_url),
    };

    let prompt = msgs.format(
        MessageKey::UpdatePrompt,
        &[
            ("latest_version", latest_version.as_str()),
            ("current_version", request.current_version.as_str()),
        ],
    );
    if !dialogs.confirm(msgs.get(MessageKey::UpdateAvailable), &prompt) {
        info!("用户拒绝更新到 {}", latest_version);
        return Ok(Outcome::Declined);
    }

    let progress = dialogs.open_progress(
        msgs.get(MessageKey::DownloadTitle),
        msgs.get(MessageKey::DownloadStart),
    );

    let download_result = async {
        let destination = utils::resolve_download_path(request.save_path.as_deref(), &download_url)?;
        let status = Downloader::new(context.clone())
            .download(&download_url, &destination, &progress)
            .await?;
        Ok::<_, AppError>((destination, status))
    }
    .await;

    match download_result {
        Ok((destination, DownloadStatus::Completed)) => {
            progress.finish(msgs.get(MessageKey::DownloadComplete));

            let job = InstallerJob::new(destination, request.app_path.clone());
            if installer::run_installer(&job, &context.config, spawner) {
                Ok(Outcome::Launched)
            } else {
                dialogs.error(msgs.get(MessageKey::Error), msgs.get(MessageKey::LauncherError));
                Ok(Outcome::Failed)
            }
        }
        Ok((_, DownloadStatus::Cancelled)) => {
            progress.close();
            dialogs.info(
                msgs.get(MessageKey::DownloadCancelled),
                msgs.get(MessageKey::CancelMessage),
            );
            Ok(Outcome::Cancelled)
        }
        Err(e) => {
            progress.close();
            warn!("下载阶段出错: {}", e);
            dialogs.error(msgs.get(MessageKey::Error), &describe_error(msgs, &e));
            Ok(Outcome::Failed)
        }
    }
}

/// 把错误翻译成当前语言的提示文本
pub fn describe_error(msgs: &Messages, error: &AppError) -> String {
    let detail = error.to_string();
    match error {
        AppError::Network(_) => msgs.format(MessageKey::NetworkError, &[("error", detail.as_str())]),
        AppError::Json(_) => msgs.get(MessageKey::JsonError).to_string(),
        e if e.is_format_error() => msgs.get(MessageKey::VersionFormatError).to_string(),
        _ => msgs.format(MessageKey::UnexpectedError, &[("error", detail.as_str())]),
    }
}
