// src/constants.rs

pub const UI_WIDTH: usize = 64;
pub const MAX_FILENAME_BYTES: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = "updater.log";
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const USER_AGENT: &str = concat!(clap::crate_name!(), "/", clap::crate_version!());

/// URL 中没有文件名时使用的默认文件名
pub const DEFAULT_INSTALLER_NAME: &str = "update.exe";
pub const CHUNK_SIZE: usize = 8 * 1024;
pub const REMOVE_MAX_ATTEMPTS: u32 = 5;
pub const REMOVE_RETRY_DELAY_SECS: u64 = 1;

pub mod installer {
    pub const PACKAGE_EXTENSION: &str = "msi";
    pub const SCRIPT_FILE_NAME: &str = "update_and_restart.bat";
    pub const LOG_FILE_NAME: &str = "install.log";
    /// 安装完成后等待文件锁释放的秒数
    pub const SETTLE_DELAY_SECS: u64 = 5;
}
