// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("version information is missing 'latest-version' or 'download-url'")]
    VersionFormat,
    #[error("'{value}' is not a valid version: {source}")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },
    #[error("file {url} is empty or missing.")]
    EmptyResource { url: String },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 版本信息字段缺失或版本号无法解析，都归为格式错误
    pub fn is_format_error(&self) -> bool {
        matches!(self, AppError::VersionFormat | AppError::InvalidVersion { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
