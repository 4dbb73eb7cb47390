// src/version.rs

use crate::{client::UpdateClient, error::*};
use log::{debug, info};
use semver::Version;
use serde::Deserialize;

/// 远端版本信息文件的内容。两个字段都必须存在且非空。
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    #[serde(rename = "latest-version")]
    pub latest_version: Option<String>,
    #[serde(rename = "download-url")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    UpdateAvailable {
        latest_version: String,
        download_url: String,
    },
    UpToDate,
}

impl VersionInfo {
    /// 取出两个必需字段，缺失或为空都视为格式错误
    pub fn required_fields(&self) -> AppResult<(&str, &str)> {
        let latest = self.latest_version.as_deref().map(str::trim).unwrap_or_default();
        let url = self.download_url.as_deref().map(str::trim).unwrap_or_default();
        if latest.is_empty() || url.is_empty() {
            return Err(AppError::VersionFormat);
        }
        Ok((latest, url))
    }
}

/// 解析语义化版本号。
/// 允许 "v" 前缀和省略的次/修订号 ("2" -> 2.0.0, "1.5" -> 1.5.0)，其余格式一律报错。
pub fn parse_version(text: &str) -> AppResult<Version> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let (core, suffix) = match stripped.find(['-', '+']) {
        Some(idx) => stripped.split_at(idx),
        None => (stripped, ""),
    };
    let padded = match core.split('.').count() {
        1 if !core.is_empty() => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => stripped.to_string(),
    };

    Version::parse(&padded).map_err(|source| AppError::InvalidVersion {
        value: text.to_string(),
        source,
    })
}

/// 比较远端最新版本与当前版本，得出是否需要更新
pub fn decide(info: &VersionInfo, current_version: &str) -> AppResult<UpdateDecision> {
    let (latest_str, download_url) = info.required_fields()?;
    let latest = parse_version(latest_str)?;
    let current = parse_version(current_version)?;
    debug!("版本比较: 最新={}, 当前={}", latest, current);

    if latest > current {
        Ok(UpdateDecision::UpdateAvailable {
            latest_version: latest_str.to_string(),
            download_url: download_url.to_string(),
        })
    } else {
        Ok(UpdateDecision::UpToDate)
    }
}

pub async fn check_for_update(
    client: &UpdateClient,
    version_check_url: &str,
    current_version: &str,
) -> AppResult<UpdateDecision> {
    info!("检查更新: {}", version_check_url);
    let version_info = client.fetch_version_info(version_check_url).await?;
    let decision = decide(&version_info, current_version)?;
    info!("检查结果: {:?}", decision);
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(latest: Option<&str>, url: Option<&str>) -> VersionInfo {
        VersionInfo {
            latest_version: latest.map(String::from),
            download_url: url.map(String::from),
        }
    }

    #[test]
    fn test_parse_version_is_semantic_not_lexicographic() {
        assert!(parse_version("1.10.0").unwrap() > parse_version("1.9.0").unwrap());
        assert!(parse_version("2.0.0").unwrap() > parse_version("1.99.99").unwrap());
        assert!(parse_version("1.0.0").unwrap() > parse_version("1.0.0-beta.2").unwrap());
    }

    #[test]
    fn test_parse_version_pads_short_forms() {
        assert_eq!(parse_version("2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_version("1.5").unwrap(), Version::new(1, 5, 0));
        assert_eq!(parse_version("v3.1.4").unwrap(), Version::new(3, 1, 4));
        assert_eq!(parse_version(" 1.2.3 ").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("1.5-rc.1").unwrap(), Version::parse("1.5.0-rc.1").unwrap());
    }

    #[test]
    fn test_parse_version_rejects_garbage() {
        for bad in ["", "abc", "1.2.x", "1..2", "1.2.3.4", "v"] {
            let err = parse_version(bad).unwrap_err();
            assert!(err.is_format_error(), "'{}' should be a format error", bad);
        }
    }

    #[test]
    fn test_decide_orders_both_ways() {
        let pairs = [("2.0.0", "1.5.0"), ("1.10.0", "1.9.9"), ("0.2.0", "0.1.99"), ("1.0.1", "1.0.0")];
        for (greater, lesser) in pairs {
            let available = decide(&info(Some(greater), Some("https://x/a.exe")), lesser).unwrap();
            assert!(matches!(available, UpdateDecision::UpdateAvailable { .. }));

            let reversed = decide(&info(Some(lesser), Some("https://x/a.exe")), greater).unwrap();
            assert_eq!(reversed, UpdateDecision::UpToDate);
        }
    }

    #[test]
    fn test_equal_versions_are_up_to_date() {
        let decision = decide(&info(Some("2.0.0"), Some("https://x/a.exe")), "2.0.0").unwrap();
        assert_eq!(decision, UpdateDecision::UpToDate);
    }

    #[test]
    fn test_missing_or_empty_fields_are_format_errors() {
        let cases = [
            info(Some("9.0.0"), None),
            info(None, Some("https://x/a.exe")),
            info(Some(""), Some("https://x/a.exe")),
            info(Some("9.0.0"), Some("  ")),
        ];
        for case in cases {
            assert!(matches!(decide(&case, "1.0.0"), Err(AppError::VersionFormat)));
        }
    }

    #[test]
    fn test_invalid_current_version_is_not_treated_as_equal() {
        let result = decide(&info(Some("2.0.0"), Some("https://x/a.exe")), "not-a-version");
        assert!(matches!(result, Err(AppError::InvalidVersion { .. })));
    }

    #[test]
    fn test_version_info_ignores_extra_keys() {
        let parsed: VersionInfo = serde_json::from_str(
            r#"{"latest-version":"2.0.0","download-url":"https://x/a.exe","notes":"fixes"}"#,
        )
        .unwrap();
        assert_eq!(parsed, info(Some("2.0.0"), Some("https://x/a.exe")));
    }
}
