// src/client.rs

use crate::{config::AppConfig, error::*, version::VersionInfo};
use log::debug;
use reqwest::{IntoUrl, Response};
use std::sync::Arc;

#[derive(Clone)]
pub struct UpdateClient {
    pub client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl UpdateClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub async fn get<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self.client.get(url).send().await?;
        Ok(res.error_for_status()?)
    }

    /// 下载并解析版本信息。
    /// 先取完整的响应体再解析 JSON，以便把网络错误和格式错误区分开。
    pub async fn fetch_version_info(&self, url: &str) -> AppResult<VersionInfo> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.config.check_timeout {
            request = request.timeout(timeout);
        }
        let res = request.send().await?.error_for_status()?;
        let body = res.bytes().await?;
        debug!("版本信息响应 ({} 字节)", body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}
