// src/config.rs

use crate::{constants, error::AppResult};
use anyhow::{Context, anyhow};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub check_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    /// 默认不设超时，与网络请求的原有行为保持一致
    pub connect_timeout: Option<Duration>,
    pub check_timeout: Option<Duration>,
    pub chunk_size: usize,
    pub remove_attempts: u32,
    pub remove_delay: Duration,
    pub install_settle_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: constants::USER_AGENT.to_string(),
            connect_timeout: None,
            check_timeout: None,
            chunk_size: constants::CHUNK_SIZE,
            remove_attempts: constants::REMOVE_MAX_ATTEMPTS,
            remove_delay: Duration::from_secs(constants::REMOVE_RETRY_DELAY_SECS),
            install_settle_delay: Duration::from_secs(constants::installer::SETTLE_DELAY_SECS),
        }
    }
}

impl AppConfig {
    /// 读取 `~/.updater/config.json`（若存在），配置文件有问题时只记日志并使用默认值
    pub fn load() -> Self {
        match load_external_config() {
            Ok(Some(external)) => Self::from_external(external),
            Ok(None) => {
                debug!("未找到外部配置文件，使用默认配置");
                Self::default()
            }
            Err(e) => {
                warn!("外部配置文件无效，使用默认配置: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_external(external: ExternalConfig) -> Self {
        let defaults = Self::default();
        let network = external.network;
        Self {
            user_agent: network.user_agent.unwrap_or(defaults.user_agent),
            connect_timeout: network.connect_timeout_secs.map(Duration::from_secs),
            check_timeout: network.check_timeout_secs.map(Duration::from_secs),
            ..defaults
        }
    }
}

pub(crate) fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| anyhow!("cannot determine the home directory"))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

fn load_external_config() -> AppResult<Option<ExternalConfig>> {
    let config_path = get_config_path()?;
    if !config_path.is_file() {
        return Ok(None);
    }
    info!("加载配置文件: {}", config_path.display());
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read '{}'", config_path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse '{}'", config_path.display()))?;
    Ok(Some(config))
}
