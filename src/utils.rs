// src/utils.rs

use crate::{constants, error::*};
use log::{debug, warn};
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};
use url::Url;

// `%` 在批处理脚本的引号内仍会被展开，同样替换掉
static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|%\x00-\x1f]"#).expect("static regex"));
static RESERVED_STEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])$").expect("static regex"));
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// 把 URL 中得到的文件名整理成可以直接放进保存目录和安装脚本的名称。
/// 扩展名原样保留，超长时只截断主干部分。
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = UNSAFE_CHARS_RE.replace_all(name, " ");
    let cleaned = WHITESPACE_RE.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if cleaned.is_empty() {
        return constants::DEFAULT_INSTALLER_NAME.to_string();
    }

    let (stem, extension) = split_extension(cleaned);
    if extension.len() >= constants::MAX_FILENAME_BYTES {
        return truncate_on_char_boundary(cleaned, constants::MAX_FILENAME_BYTES).to_string();
    }
    let stem = if RESERVED_STEM_RE.is_match(stem) {
        format!("_{}", stem)
    } else {
        stem.to_string()
    };
    let budget = constants::MAX_FILENAME_BYTES - extension.len();
    format!("{}{}", truncate_on_char_boundary(&stem, budget), extension)
}

/// 拆成 (主干, ".扩展名")，没有扩展名时第二项为空
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    let end = (0..=max_bytes.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// 取下载地址路径的最后一段作为文件名并做百分号解码。
/// 路径为空时使用默认文件名；解码结果不是合法 UTF-8 时退回原始片段。
pub fn file_name_from_url(download_url: &str) -> AppResult<String> {
    let url = Url::parse(download_url)?;
    let raw = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    if raw.is_empty() {
        return Ok(constants::DEFAULT_INSTALLER_NAME.to_string());
    }

    let decoded = match percent_decode_str(raw).decode_utf8() {
        Ok(name) => name.into_owned(),
        Err(e) => {
            warn!("文件名 '{}' 解码失败: {}，使用原始名称", raw, e);
            raw.to_string()
        }
    };
    Ok(sanitize_filename(&decoded))
}

/// 计算安装包的保存路径：`save_path` 是已存在的目录时保存到其中，否则保存到当前目录。
pub fn resolve_download_path(save_path: Option<&Path>, download_url: &str) -> AppResult<PathBuf> {
    let file_name = file_name_from_url(download_url)?;
    let dir = match save_path {
        Some(dir) if dir.is_dir() => dir.to_path_buf(),
        Some(dir) => {
            warn!("保存路径 '{}' 不是已存在的目录，改用当前目录", dir.display());
            std::env::current_dir()?
        }
        None => std::env::current_dir()?,
    };
    let path = dir.join(file_name);
    debug!("下载保存路径: {}", path.display());
    Ok(path)
}
