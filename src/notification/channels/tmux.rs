//! tmux 状态栏渠道 - 通过 display-message 显示单行消息

use anyhow::Result;

use super::{NotificationChannel, SendResult};
use crate::infra::tmux::TmuxClient;
use crate::notification::formatter::NotificationContent;

/// tmux 渠道
pub struct TmuxChannel {
    tmux: TmuxClient,
}

impl TmuxChannel {
    pub fn new(tmux: TmuxClient) -> Self {
        Self { tmux }
    }
}

impl NotificationChannel for TmuxChannel {
    fn name(&self) -> &str {
        "tmux"
    }

    fn send(&self, content: &NotificationContent) -> Result<SendResult> {
        let line = content.line();
        if line.trim().is_empty() {
            return Ok(SendResult::Skipped("empty message".to_string()));
        }

        if self.tmux.display_message(&line) {
            Ok(SendResult::Sent)
        } else {
            Ok(SendResult::Failed("tmux display-message failed".to_string()))
        }
    }
}
