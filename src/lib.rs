// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod i18n;
pub mod installer;
pub mod progress;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod version;
pub mod workflows;

use crate::{
    cli::Cli,
    client::UpdateClient,
    config::AppConfig,
    error::AppResult,
    i18n::{MessageKey, Messages},
    installer::DetachedSpawner,
    progress::CancelSignal,
    ui::ConsoleDialogs,
    workflows::Outcome,
};
use log::{debug, warn};
use std::{path::PathBuf, sync::Arc};

/// 更新流程共享的上下文。界面文本在启动时选定一次，显式传给各个组件。
#[derive(Clone)]
pub struct UpdateContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<UpdateClient>,
    pub messages: &'static Messages,
}

impl UpdateContext {
    pub fn new(config: Arc<AppConfig>, messages: &'static Messages) -> AppResult<Self> {
        let http_client = Arc::new(UpdateClient::new(config.clone())?);
        Ok(Self { config, http_client, messages })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub version_check_url: String,
    pub current_version: String,
    pub save_path: Option<PathBuf>,
    pub app_path: Option<PathBuf>,
}

impl UpdateRequest {
    /// 前两个位置参数缺一不可
    pub fn from_cli(args: &Cli) -> Option<Self> {
        Some(Self {
            version_check_url: args.version_check_url.clone()?,
            current_version: args.current_version.clone()?,
            save_path: args.save_path.clone(),
            app_path: args.app_path.clone(),
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(
    args: &Cli,
    messages: &'static Messages,
    cancel: CancelSignal,
) -> AppResult<Outcome> {
    debug!("CLI 参数: {:?}", args);
    if !args.extra_args.is_empty() {
        warn!("忽略多余的参数: {:?}", args.extra_args);
    }
    let Some(request) = UpdateRequest::from_cli(args) else {
        println!("{}", messages.get(MessageKey::Usage));
        return Ok(Outcome::UsagePrinted);
    };

    let config = Arc::new(AppConfig::load());
    debug!("加载的应用配置: {:?}", config);

    let context = UpdateContext::new(config, messages)?;
    let dialogs = ConsoleDialogs::new(messages, cancel);
    workflows::run_update(&context, &request, &dialogs, &DetachedSpawner).await
}
