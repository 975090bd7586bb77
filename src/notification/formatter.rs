//! 通知内容格式化 - 把助手消息压缩成标题 + 正文

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::markdown::{flatten_markdown, DEFAULT_WIDTH};
use crate::config::NotifyConfig;

/// 默认标题（agent 标识）
pub const DEFAULT_TITLE: &str = "π";
/// 没有可用内容时的标题
pub const IDLE_TITLE: &str = "Ready for input";
/// 正文最大字符数
pub const MAX_BODY_CHARS: usize = 200;
/// 截断标记
pub const ELLIPSIS: char = '…';

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// 通知内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// 单行形式：有正文时为 "title: body"，否则只有标题
    pub fn line(&self) -> String {
        if self.body.is_empty() {
            self.title.clone()
        } else {
            format!("{}: {}", self.title, self.body)
        }
    }
}

/// 消息格式化器
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    title: String,
    idle_title: String,
    max_body_chars: usize,
    wrap_width: usize,
}

impl MessageFormatter {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            idle_title: IDLE_TITLE.to_string(),
            max_body_chars: MAX_BODY_CHARS,
            wrap_width: DEFAULT_WIDTH,
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        Self {
            title: config.title.clone(),
            idle_title: config.idle_title.clone(),
            max_body_chars: config.max_body_chars.max(1),
            wrap_width: config.wrap_width,
        }
    }

    /// 格式化最后一条助手消息；None 或渲染后为空时返回空闲通知
    pub fn format(&self, text: Option<&str>) -> NotificationContent {
        let collapsed = text
            .map(|t| collapse_whitespace(&flatten_markdown(t, self.wrap_width).join("\n")))
            .unwrap_or_default();

        if collapsed.is_empty() {
            return NotificationContent::new(self.idle_title.clone(), "");
        }

        NotificationContent::new(
            self.title.clone(),
            truncate_body(&collapsed, self.max_body_chars),
        )
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认参数格式化
pub fn format_notification(text: Option<&str>) -> NotificationContent {
    MessageFormatter::new().format(text)
}

/// 把所有空白序列压成单个空格，并去掉首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// 按字符数截断，超长时最后一个保留字符替换为省略号
pub fn truncate_body(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut body: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    body.push(ELLIPSIS);
    body
}
