// src/main.rs

use clap::Parser;
use colored::*;
use log::{error, info};
use std::{
    env,
    fs::{self, File},
    iter,
    time::Duration,
};
use updater::{
    cli::{Cli, LogLevel},
    constants,
    i18n::Locale,
    progress::CancelSignal,
    run_from_cli, symbols,
    workflows::describe_error,
};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let args = Cli::parse();
    setup_logger(args.log_level);

    let messages = Locale::detect().messages();

    // 下载过程中 Ctrl+C 等同于点击"取消"；再按一次或不在下载中时直接退出
    let cancel = CancelSignal::default();
    let ctrl_c_signal = cancel.clone();
    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            if ctrl_c_signal.is_requested() || !ctrl_c_signal.request() {
                println!("\n{} Ctrl+C", *symbols::WARN);
                tokio::time::sleep(Duration::from_millis(100)).await;
                std::process::exit(130);
            }
        }
    });

    match run_from_cli(&args, messages, cancel).await {
        Ok(outcome) => {
            info!("更新流程结束: {:?}", outcome);
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            error!("更新流程出错: {}", e);
            eprintln!("{} Updater error: {}", *symbols::ERROR, describe_error(messages, &e).red());
            std::process::exit(1);
        }
    }
}

/// 日志只写文件，不输出到终端。`--log-level off`（默认）时完全不初始化。
fn setup_logger(level: LogLevel) {
    let filter = level.to_filter();
    if filter == log::LevelFilter::Off {
        return;
    }

    let Some(log_file) = open_log_file() else {
        eprintln!("{} no writable log file, logging is disabled.", *symbols::WARN);
        return;
    };

    let result = fern::Dispatch::new()
        .level(filter)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{:<5}] [{}:{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(log_file)
        .apply();

    if let Err(e) = result {
        eprintln!("{} failed to initialise logging: {}", *symbols::WARN, e);
    }
}

/// 依次尝试 `~/.updater/updater.log` 和临时目录下的备用文件
fn open_log_file() -> Option<File> {
    let fallback = env::temp_dir().join(format!(
        "{}-{}",
        clap::crate_name!(),
        constants::LOG_FALLBACK_FILE_NAME
    ));
    let candidates = dirs::home_dir()
        .map(|home| home.join(constants::CONFIG_DIR_NAME).join(constants::LOG_FILE_NAME))
        .into_iter()
        .chain(iter::once(fallback));

    for path in candidates {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).ok();
        }
        match fern::log_file(&path) {
            Ok(file) => return Some(file),
            Err(e) => eprintln!("{} cannot open log file {}: {}", *symbols::WARN, path.display(), e),
        }
    }
    None
}
