// src/i18n.rs

use log::debug;

/// 支持的界面语言。只有两种：韩语和默认的英语。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Korean,
}

impl Locale {
    /// 读取操作系统的语言设置，读取失败时回退到英语
    pub fn detect() -> Self {
        let tag = sys_locale::get_locale();
        debug!("系统语言标签: {:?}", tag);
        Self::from_tag(tag.as_deref())
    }

    /// 只看两位语言代码，例如 "ko-KR" / "ko_KR.UTF-8" -> "ko"
    pub fn from_tag(tag: Option<&str>) -> Self {
        let code = tag
            .and_then(|t| t.split(['-', '_', '.']).next())
            .map(str::to_ascii_lowercase);
        match code.as_deref() {
            Some("ko") => Locale::Korean,
            _ => Locale::English,
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::English => &EN,
            Locale::Korean => &KO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    DownloadTitle,
    DownloadStart,
    Downloading,
    DownloadComplete,
    UpdateAvailable,
    UpdatePrompt,
    CancelButton,
    DownloadCancelled,
    CancelMessage,
    Error,
    NetworkError,
    LauncherError,
    JsonError,
    UnexpectedError,
    VersionFormatError,
    UpToDate,
    UpToDateMessage,
    Usage,
    InstallComplete,
    CleaningUp,
}

/// 一套界面文本模板。占位符写作 `{name}`，由 [`Messages::format`] 填充。
#[derive(Debug)]
pub struct Messages {
    download_title: &'static str,
    download_start: &'static str,
    downloading: &'static str,
    download_complete: &'static str,
    update_available: &'static str,
    update_prompt: &'static str,
    cancel_button: &'static str,
    download_cancelled: &'static str,
    cancel_message: &'static str,
    error: &'static str,
    network_error: &'static str,
    launcher_error: &'static str,
    json_error: &'static str,
    unexpected_error: &'static str,
    version_format_error: &'static str,
    up_to_date: &'static str,
    up_to_date_message: &'static str,
    usage: &'static str,
    install_complete: &'static str,
    cleaning_up: &'static str,
}

impl Messages {
    pub fn get(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::DownloadTitle => self.download_title,
            MessageKey::DownloadStart => self.download_start,
            MessageKey::Downloading => self.downloading,
            MessageKey::DownloadComplete => self.download_complete,
            MessageKey::UpdateAvailable => self.update_available,
            MessageKey::UpdatePrompt => self.update_prompt,
            MessageKey::CancelButton => self.cancel_button,
            MessageKey::DownloadCancelled => self.download_cancelled,
            MessageKey::CancelMessage => self.cancel_message,
            MessageKey::Error => self.error,
            MessageKey::NetworkError => self.network_error,
            MessageKey::LauncherError => self.launcher_error,
            MessageKey::JsonError => self.json_error,
            MessageKey::UnexpectedError => self.unexpected_error,
            MessageKey::VersionFormatError => self.version_format_error,
            MessageKey::UpToDate => self.up_to_date,
            MessageKey::UpToDateMessage => self.up_to_date_message,
            MessageKey::Usage => self.usage,
            MessageKey::InstallComplete => self.install_complete,
            MessageKey::CleaningUp => self.cleaning_up,
        }
    }

    pub fn format(&self, key: MessageKey, params: &[(&str, &str)]) -> String {
        let mut text = self.get(key).to_string();
        for (name, value) in params {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}

static EN: Messages = Messages {
    download_title: "Update Download",
    download_start: "Starting download...",
    downloading: "Downloading... ({progress})",
    download_complete: "Download complete. Launching installer...",
    update_available: "Update Available",
    update_prompt: "New version {latest_version} is available. Current version: {current_version}\n\nDo you want to update?",
    cancel_button: "Cancel",
    download_cancelled: "Download Cancelled",
    cancel_message: "Download has been cancelled.",
    error: "Error",
    network_error: "Network error occurred:\n{error}",
    launcher_error: "Error launching update program.",
    json_error: "Invalid version information file.",
    unexpected_error: "An unexpected error occurred:\n{error}",
    version_format_error: "Invalid version information format.",
    up_to_date: "Up to Date",
    up_to_date_message: "You are using the latest version.",
    usage: "Usage: updater <version_check_url> <current_version> [save_path] [app_path]",
    install_complete: "Installation Complete",
    cleaning_up: "Cleaning up temporary files...",
};

static KO: Messages = Messages {
    download_title: "업데이트 다운로드",
    download_start: "다운로드를 시작합니다...",
    downloading: "다운로드 중... ({progress})",
    download_complete: "다운로드 완료. 설치 프로그램을 실행합니다...",
    update_available: "업데이트 가능",
    update_prompt: "새로운 버전 {latest_version}이(가) 있습니다. 현재 버전: {current_version}\n\n업데이트하시겠습니까?",
    cancel_button: "취소",
    download_cancelled: "다운로드 취소됨",
    cancel_message: "다운로드가 취소되었습니다.",
    error: "오류",
    network_error: "네트워크 오류가 발생했습니다:\n{error}",
    launcher_error: "업데이트 프로그램 실행 중 오류가 발생했습니다.",
    json_error: "버전 정보 파일이 올바르지 않습니다.",
    unexpected_error: "예상치 못한 오류가 발생했습니다:\n{error}",
    version_format_error: "버전 정보 형식이 잘못되었습니다.",
    up_to_date: "알림",
    up_to_date_message: "현재 최신 버전을 사용 중입니다.",
    usage: "사용법: updater <version_check_url> <current_version> [save_path] [app_path]",
    install_complete: "설치 완료",
    cleaning_up: "임시 파일을 정리하는 중...",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag(Some("ko")), Locale::Korean);
        assert_eq!(Locale::from_tag(Some("ko-KR")), Locale::Korean);
        assert_eq!(Locale::from_tag(Some("KO_kr.UTF-8")), Locale::Korean);

        // 其他语言一律回退到英语
        assert_eq!(Locale::from_tag(Some("en-US")), Locale::English);
        assert_eq!(Locale::from_tag(Some("zh-CN")), Locale::English);
        assert_eq!(Locale::from_tag(Some("kok")), Locale::English);
        assert_eq!(Locale::from_tag(Some("")), Locale::English);
        assert_eq!(Locale::from_tag(None), Locale::English);
    }

    #[test]
    fn test_format_fills_named_placeholders() {
        let msgs = Locale::English.messages();
        let text = msgs.format(
            MessageKey::UpdatePrompt,
            &[("latest_version", "2.0.0"), ("current_version", "1.5.0")],
        );
        assert!(text.starts_with("New version 2.0.0 is available. Current version: 1.5.0"));
        assert!(!text.contains('{'));

        let korean = Locale::Korean
            .messages()
            .format(MessageKey::Downloading, &[("progress", "42.0%")]);
        assert_eq!(korean, "다운로드 중... (42.0%)");
    }

    #[test]
    fn test_unknown_placeholder_is_left_alone() {
        let msgs = Locale::English.messages();
        assert_eq!(
            msgs.format(MessageKey::NetworkError, &[("progress", "1%")]),
            "Network error occurred:\n{error}"
        );
    }

    #[test]
    fn test_both_tables_use_same_placeholders() {
        let keys = [
            (MessageKey::Downloading, "{progress}"),
            (MessageKey::UpdatePrompt, "{latest_version}"),
            (MessageKey::UpdatePrompt, "{current_version}"),
            (MessageKey::NetworkError, "{error}"),
            (MessageKey::UnexpectedError, "{error}"),
        ];
        for (key, placeholder) in keys {
            assert!(Locale::English.messages().get(key).contains(placeholder));
            assert!(Locale::Korean.messages().get(key).contains(placeholder));
        }
    }
}
