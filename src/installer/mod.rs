// src/installer/mod.rs

mod script;

pub use script::{create_installer_script, render_script};

use crate::{config::AppConfig, constants::installer as consts};
use log::{error, info};
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    /// Windows Installer 包 (.msi)，需要通过 msiexec 安装
    Package,
    /// 自带安装逻辑的可执行文件
    Executable,
}

impl InstallerKind {
    pub fn detect(path: &Path) -> Self {
        let is_package = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(consts::PACKAGE_EXTENSION));
        if is_package { InstallerKind::Package } else { InstallerKind::Executable }
    }
}

#[derive(Debug, Clone)]
pub struct InstallerJob {
    pub installer_path: PathBuf,
    pub app_path: Option<PathBuf>,
}

impl InstallerJob {
    pub fn new(installer_path: PathBuf, app_path: Option<PathBuf>) -> Self {
        Self { installer_path, app_path }
    }
}

/// 要以独立进程启动的命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// 在新的控制台窗口中运行
    pub new_console: bool,
}

pub trait Spawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<()>;
}

/// 启动与本进程生命周期无关的子进程，本进程随后可以直接退出。
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&self, command: &LaunchCommand) -> io::Result<()> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NEW_CONSOLE: u32 = 0x00000010;
            // DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP
            const DETACHED: u32 = 0x00000008 | 0x00000200;
            cmd.creation_flags(if command.new_console { CREATE_NEW_CONSOLE } else { DETACHED });
        }

        if !command.new_console {
            cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        }
        cmd.spawn().map(drop)
    }
}

/// 根据安装包类型决定如何启动。
/// .msi 通过生成的脚本在新控制台中静默安装，其余文件直接作为可执行文件启动。
pub fn launch_command(job: &InstallerJob, config: &AppConfig) -> crate::error::AppResult<LaunchCommand> {
    match InstallerKind::detect(&job.installer_path) {
        InstallerKind::Package => {
            info!("为 MSI 安装包生成安装脚本: {}", job.installer_path.display());
            let script_path = create_installer_script(job, config.install_settle_delay)?;
            Ok(LaunchCommand {
                program: PathBuf::from("cmd"),
                args: vec![OsString::from("/c"), script_path.into_os_string()],
                new_console: true,
            })
        }
        InstallerKind::Executable => Ok(LaunchCommand {
            program: job.installer_path.clone(),
            args: Vec::new(),
            new_console: false,
        }),
    }
}

/// 启动安装程序，成功交接后返回 `true`。失败原因只记录日志，由调用方决定如何提示用户。
pub fn run_installer(job: &InstallerJob, config: &AppConfig, spawner: &dyn Spawner) -> bool {
    if !job.installer_path.exists() {
        error!("找不到安装程序: {}", job.installer_path.display());
        return false;
    }

    let command = match launch_command(job, config) {
        Ok(command) => command,
        Err(e) => {
            error!("准备安装命令失败: {}", e);
            return false;
        }
    };

    info!("启动安装程序: {:?} {:?}", command.program, command.args);
    match spawner.spawn(&command) {
        Ok(()) => true,
        Err(e) => {
            error!("启动安装程序失败: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, sync::Mutex};

    #[derive(Default)]
    struct RecordingSpawner {
        launched: Mutex<Vec<LaunchCommand>>,
        fail: bool,
    }

    impl Spawner for RecordingSpawner {
        fn spawn(&self, command: &LaunchCommand) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "blocked"));
            }
            self.launched.lock().unwrap().push(command.clone());
            Ok(())
        }
    }

    #[test]
    fn test_detect_installer_kind() {
        assert_eq!(InstallerKind::detect(Path::new("a/setup.msi")), InstallerKind::Package);
        assert_eq!(InstallerKind::detect(Path::new("SETUP.MSI")), InstallerKind::Package);
        assert_eq!(InstallerKind::detect(Path::new("setup.exe")), InstallerKind::Executable);
        assert_eq!(InstallerKind::detect(Path::new("msi")), InstallerKind::Executable);
    }

    #[test]
    fn test_missing_installer_is_not_launched() {
        let spawner = RecordingSpawner::default();
        let job = InstallerJob::new(PathBuf::from("definitely/missing/setup.exe"), None);
        assert!(!run_installer(&job, &AppConfig::default(), &spawner));
        assert!(spawner.launched.lock().unwrap().is_empty());
    }

    #[test]
    fn test_executable_is_spawned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let installer = dir.path().join("setup.exe");
        fs::write(&installer, b"exe").unwrap();
        let spawner = RecordingSpawner::default();

        let job = InstallerJob::new(installer.clone(), None);
        assert!(run_installer(&job, &AppConfig::default(), &spawner));

        let launched = spawner.launched.lock().unwrap();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].program, installer);
        assert!(launched[0].args.is_empty());
        assert!(!launched[0].new_console);
        assert!(!dir.path().join(consts::SCRIPT_FILE_NAME).exists());
    }

    #[test]
    fn test_package_runs_generated_script_in_new_console() {
        let dir = tempfile::tempdir().unwrap();
        let installer = dir.path().join("setup.msi");
        fs::write(&installer, b"msi").unwrap();
        let spawner = RecordingSpawner::default();

        let job = InstallerJob::new(installer, None);
        assert!(run_installer(&job, &AppConfig::default(), &spawner));

        let script = dir.path().join(consts::SCRIPT_FILE_NAME);
        let launched = spawner.launched.lock().unwrap();
        assert_eq!(launched[0].program, PathBuf::from("cmd"));
        assert_eq!(launched[0].args, vec![OsString::from("/c"), script.clone().into_os_string()]);
        assert!(launched[0].new_console);
        assert!(script.exists());
    }

    #[test]
    fn test_spawn_failure_is_reported_as_false() {
        let dir = tempfile::tempdir().unwrap();
        let installer = dir.path().join("setup.exe");
        fs::write(&installer, b"exe").unwrap();
        let spawner = RecordingSpawner { fail: true, ..Default::default() };

        let job = InstallerJob::new(installer, None);
        assert!(!run_installer(&job, &AppConfig::default(), &spawner));
    }
}
