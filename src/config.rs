//! 配置加载 - ~/.config/pi-notify/config.json
//!
//! 所有字段都有默认值。配置文件缺失或损坏时回退到默认配置，
//! 不能因为配置问题丢掉通知。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::notification::formatter::{DEFAULT_TITLE, IDLE_TITLE, MAX_BODY_CHARS};
use crate::notification::markdown::DEFAULT_WIDTH;

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "PI_NOTIFY_CONFIG";

/// 通知配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// 有内容时的通知标题
    pub title: String,
    /// 没有内容时的通知标题
    pub idle_title: String,
    /// 正文最大字符数
    pub max_body_chars: usize,
    /// markdown 渲染宽度
    pub wrap_width: usize,
    /// tmux 可执行文件
    pub tmux_bin: String,
    /// 发送成功后是否标记窗口未读
    pub mark_unread: bool,
    /// 未读标记使用的窗口选项
    pub unread_option: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            idle_title: IDLE_TITLE.to_string(),
            max_body_chars: MAX_BODY_CHARS,
            wrap_width: DEFAULT_WIDTH,
            tmux_bin: find_tmux_path(),
            mark_unread: true,
            unread_option: "@unread".to_string(),
        }
    }
}

impl NotifyConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join("pi-notify").join("config.json"))
    }

    /// 从默认位置加载（失败时回退默认配置）
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// 从指定文件加载（失败时回退默认配置）
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// 读取配置文件；文件不存在返回 Ok(None)
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(Some(config))
    }
}

/// 查找 tmux 可执行文件路径
fn find_tmux_path() -> String {
    if let Ok(path) = which::which("tmux") {
        return path.to_string_lossy().to_string();
    }

    // Hook 环境可能没有完整 PATH，检查常见位置
    for path in ["/opt/homebrew/bin/tmux", "/usr/local/bin/tmux", "/usr/bin/tmux"] {
        if Path::new(path).exists() {
            return path.to_string();
        }
    }

    "tmux".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotifyConfig::default();
        assert_eq!(config.title, "π");
        assert_eq!(config.idle_title, "Ready for input");
        assert_eq!(config.max_body_chars, 200);
        assert_eq!(config.wrap_width, 80);
        assert!(config.mark_unread);
        assert_eq!(config.unread_option, "@unread");
        assert!(config.tmux_bin.ends_with("tmux"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: NotifyConfig =
            serde_json::from_str(r#"{"title": "agent", "mark_unread": false}"#).unwrap();
        assert_eq!(config.title, "agent");
        assert!(!config.mark_unread);
        assert_eq!(config.max_body_chars, 200);
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = Path::new("/nonexistent/pi-notify/config.json");
        assert!(NotifyConfig::load_from(path).unwrap().is_none());
        assert_eq!(NotifyConfig::load_or_default(path).title, "π");
    }
}
