//! 通知分发器 - 回合结束时决定是否通知、走哪个渠道
//!
//! 流程：提取最后一条助手消息 → 格式化 → 判定渠道 → 发送 → （tmux）标记窗口未读。
//! 每次分发都重新读取环境，不在两次分发之间保留状态。

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::channel::{ChannelResolver, Route};
use super::channels::{DesktopChannel, NotificationChannel, SendResult, TmuxChannel};
use super::formatter::{MessageFormatter, NotificationContent};
use super::transcript::{extract_last_assistant_text, AgentMessage};
use crate::config::NotifyConfig;
use crate::infra::env::{EnvSource, ProcessEnv};
use crate::infra::host::{HostCommand, SystemHost};
use crate::infra::tmux::TmuxClient;

/// 分发结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// 已写出桌面通知
    Desktop,
    /// 已尝试 tmux 消息
    Tmux {
        delivered: bool,
        marked_unread: bool,
    },
    /// 用户正在看源 pane，未通知
    Suppressed { pane_id: String },
    /// dry-run：只计算不发送
    DryRun {
        route: Route,
        content: NotificationContent,
    },
}

/// 通知分发器
pub struct NotificationDispatcher {
    env: Arc<dyn EnvSource>,
    tmux: TmuxClient,
    formatter: MessageFormatter,
    desktop: DesktopChannel,
    mark_unread: bool,
    dry_run: bool,
}

impl NotificationDispatcher {
    /// 使用真实进程环境、真实命令执行和标准输出
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self::with_host(config, Arc::new(SystemHost::new()), Arc::new(ProcessEnv))
    }

    /// 注入命令执行和环境（测试替身）
    pub fn with_host(
        config: &NotifyConfig,
        host: Arc<dyn HostCommand>,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        let tmux = TmuxClient::new(host)
            .with_bin(config.tmux_bin.clone())
            .with_unread_option(config.unread_option.clone());
        Self {
            env,
            tmux,
            formatter: MessageFormatter::from_config(config),
            desktop: DesktopChannel::stdout(),
            mark_unread: config.mark_unread,
            dry_run: false,
        }
    }

    /// 替换桌面通知的输出目标
    pub fn with_desktop(mut self, desktop: DesktopChannel) -> Self {
        self.desktop = desktop;
        self
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 只格式化，不判定渠道
    pub fn preview(&self, messages: &[AgentMessage]) -> NotificationContent {
        let text = extract_last_assistant_text(messages);
        self.formatter.format(text.as_deref())
    }

    /// 当前环境下的路由
    pub fn route(&self) -> Route {
        ChannelResolver::new(self.env.clone(), self.tmux.clone()).resolve()
    }

    /// 处理一次回合结束
    pub fn dispatch(&self, messages: &[AgentMessage]) -> DispatchOutcome {
        let content = self.preview(messages);
        let route = self.route();
        debug!(?route, title = %content.title, body_len = content.body.len(), "Dispatching notification");

        if self.dry_run {
            eprintln!("[DRY-RUN] Would notify via {:?}: {}", route, content.line());
            return DispatchOutcome::DryRun { route, content };
        }

        match route {
            Route::Suppressed { pane_id } => {
                info!(pane = %pane_id, "Source pane is focused, skipping notification");
                DispatchOutcome::Suppressed { pane_id }
            }
            Route::Desktop => {
                let result = send_logged(&self.desktop, &content);
                debug!(?result, "Desktop notification finished");
                DispatchOutcome::Desktop
            }
            Route::Tmux { pane_id } => {
                let channel = TmuxChannel::new(self.tmux.clone());
                let delivered = send_logged(&channel, &content).is_sent();
                let marked_unread = delivered
                    && self.mark_unread
                    && pane_id
                        .as_deref()
                        .is_some_and(|pane| self.mark_pane_window_unread(pane));
                DispatchOutcome::Tmux {
                    delivered,
                    marked_unread,
                }
            }
        }
    }

    /// 找到 pane 所在窗口并标记未读；任何一步失败都静默返回 false
    fn mark_pane_window_unread(&self, pane_id: &str) -> bool {
        let Some(window_id) = self.tmux.window_of_pane(pane_id) else {
            return false;
        };
        let marked = self.tmux.mark_window_unread(&window_id);
        debug!(pane = %pane_id, window = %window_id, marked, "Unread marker");
        marked
    }
}

/// 发送并记录失败；错误转换为 Failed
fn send_logged(channel: &dyn NotificationChannel, content: &NotificationContent) -> SendResult {
    match channel.send(content) {
        Ok(result) => {
            if let SendResult::Failed(reason) = &result {
                warn!(channel = channel.name(), reason = %reason, "Notification not delivered");
            }
            result
        }
        Err(e) => {
            warn!(channel = channel.name(), error = %e, "Channel send failed");
            SendResult::Failed(e.to_string())
        }
    }
}
