//! 具体渠道实现

pub mod desktop;
pub mod tmux;

pub use desktop::DesktopChannel;
pub use tmux::TmuxChannel;

use anyhow::Result;

use super::formatter::NotificationContent;

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（没有可发送的内容）
    Skipped(String),
    /// 发送失败
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// 通知渠道 trait
pub trait NotificationChannel: Send + Sync {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送（一次尝试，不重试）
    fn send(&self, content: &NotificationContent) -> Result<SendResult>;
}
