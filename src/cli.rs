// src/cli.rs

use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// 位置参数在解析层面都是可选的：参数不足时打印本地化的用法并以 0 退出，
// 而不是交给 clap 报错。
#[derive(Parser, Debug, Clone)]
#[command(
    name = "updater",
    version = crate_version!(),
    about,
    long_about = None,
)]
pub struct Cli {
    /// URL of the JSON document describing the latest version
    pub version_check_url: Option<String>,
    /// Version currently installed (e.g. 1.5.0)
    pub current_version: Option<String>,
    /// Directory to save the installer into (defaults to the current directory)
    pub save_path: Option<PathBuf>,
    /// Application to start again after a successful MSI install
    pub app_path: Option<PathBuf>,
    /// 多余的位置参数，忽略
    #[arg(hide = true)]
    pub extra_args: Vec<String>,

    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, hide = true)]
    pub log_level: LogLevel,
}
