// src/installer/script.rs

use super::{InstallerJob, InstallerKind};
use crate::{constants::installer as consts, error::*};
use anyhow::anyhow;
use log::{debug, info};
use std::{fs, path::PathBuf, time::Duration};

const LINE_ENDING: &str = "\r\n";

/// 在安装包所在目录生成自删除的批处理脚本，返回脚本路径。
pub fn create_installer_script(job: &InstallerJob, settle_delay: Duration) -> AppResult<PathBuf> {
    let installer_dir = job
        .installer_path
        .parent()
        .ok_or_else(|| anyhow!("installer path '{}' has no parent directory", job.installer_path.display()))?;
    let script_path = installer_dir.join(consts::SCRIPT_FILE_NAME);

    let content = render_script(job, settle_delay)?;
    fs::write(&script_path, content)?;
    info!("已生成安装脚本: {}", script_path.display());
    Ok(script_path)
}

/// 按顺序生成脚本内容：
/// 安装 -> 检查退出码 -> 等待文件锁释放 -> 删除安装包和日志 -> 重启程序 -> 删除脚本自身。
/// 安装失败时打印日志、等待用户确认并以 1 退出。
pub fn render_script(job: &InstallerJob, settle_delay: Duration) -> AppResult<String> {
    let installer_path = dunce::canonicalize(&job.installer_path)?;
    let installer_dir = installer_path
        .parent()
        .ok_or_else(|| anyhow!("installer path '{}' has no parent directory", installer_path.display()))?;
    let installer_name = installer_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("installer path '{}' has no file name", installer_path.display()))?;
    let app_path = match &job.app_path {
        Some(app) => Some(std::path::absolute(app)?),
        None => None,
    };
    let log_name = consts::LOG_FILE_NAME;

    let mut lines: Vec<String> = vec![
        "@echo off".into(),
        "echo Starting installation...".into(),
        format!("echo Installer path: {}", installer_path.display()),
        format!("cd /d \"{}\"", installer_dir.display()),
    ];

    match InstallerKind::detect(&installer_path) {
        InstallerKind::Package => {
            lines.push("echo Installing MSI package...".into());
            lines.push(format!(
                "msiexec /i \"{}\" /passive /log \"{}\"",
                installer_name, log_name
            ));
        }
        InstallerKind::Executable => {
            lines.push("echo Running executable installer...".into());
            lines.push(format!("start /wait \"\" \"{}\"", installer_name));
        }
    }
    lines.push("if errorlevel 1 goto error".into());

    lines.push(format!("timeout /t {} /nobreak", settle_delay.as_secs()));
    lines.push(format!("del /f /q \"{}\"", installer_name));
    lines.push(format!("if exist \"{0}\" del /f /q \"{0}\"", log_name));

    if let Some(app) = &app_path {
        lines.push(format!("echo Starting application: {}", app.display()));
        lines.push(format!("start \"\" \"{}\"", app.display()));
    }

    // 先跳出再删除自身，避免 cmd 继续读取已删除的脚本
    lines.push("(goto) 2>nul & del \"%~f0\"".into());
    lines.push("exit /b 0".into());

    lines.push(":error".into());
    lines.push("echo Installation failed!".into());
    lines.push(format!("if exist \"{0}\" type \"{0}\"", log_name));
    lines.push("pause".into());
    lines.push("exit /b 1".into());

    debug!("安装脚本共 {} 行", lines.len());
    let mut script = lines.join(LINE_ENDING);
    script.push_str(LINE_ENDING);
    Ok(script)
}
