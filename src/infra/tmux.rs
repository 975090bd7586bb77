//! tmux 管理模块 - 封装通知需要的 tmux 操作

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::host::HostCommand;

/// 标记未读时使用的窗口选项值
const UNREAD_VALUE: &str = "1";

/// tmux 客户端（通过注入的 HostCommand 执行）
#[derive(Clone)]
pub struct TmuxClient {
    host: Arc<dyn HostCommand>,
    bin: String,
    unread_option: String,
}

impl TmuxClient {
    pub fn new(host: Arc<dyn HostCommand>) -> Self {
        Self {
            host,
            bin: "tmux".to_string(),
            unread_option: "@unread".to_string(),
        }
    }

    /// 设置 tmux 可执行文件路径
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    /// 设置未读标记使用的窗口选项名
    pub fn with_unread_option(mut self, option: impl Into<String>) -> Self {
        self.unread_option = option.into();
        self
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// 列出所有已连接客户端当前聚焦的 pane
    ///
    /// 命令失败时返回空列表。结果去重，保持首次出现的顺序。
    pub fn list_client_panes(&self) -> Vec<String> {
        let output = self
            .host
            .exec(&self.bin, &["list-clients", "-F", "#{pane_id}"]);

        if !output.success() {
            debug!(code = output.code, "tmux list-clients failed");
            return Vec::new();
        }

        let mut panes: Vec<String> = Vec::new();
        for line in output.stdout.lines().map(str::trim) {
            if !line.is_empty() && !panes.iter().any(|p| p == line) {
                panes.push(line.to_string());
            }
        }
        panes
    }

    /// 在状态栏显示消息
    pub fn display_message(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        let output = self.host.exec(&self.bin, &["display-message", text]);
        if output.success() {
            info!(len = text.len(), "tmux message displayed");
            true
        } else {
            warn!(code = output.code, "tmux display-message failed");
            false
        }
    }

    /// 查找 pane 所在的窗口
    pub fn window_of_pane(&self, pane_id: &str) -> Option<String> {
        let output = self.host.exec(
            &self.bin,
            &["display-message", "-p", "-t", pane_id, "#{window_id}"],
        );
        if !output.success() {
            debug!(pane = %pane_id, code = output.code, "Failed to resolve window for pane");
            return None;
        }

        let window = output.stdout.trim();
        (!window.is_empty()).then(|| window.to_string())
    }

    /// 标记窗口为未读，并刷新状态栏
    pub fn mark_window_unread(&self, window_id: &str) -> bool {
        let set = self.host.exec(
            &self.bin,
            &["set", "-w", "-t", window_id, self.unread_option.as_str(), UNREAD_VALUE],
        );
        if !set.success() {
            debug!(window = %window_id, code = set.code, "Failed to set unread option");
            return false;
        }

        // 立即刷新状态栏
        let refresh = self.host.exec(&self.bin, &["refresh-client", "-S"]);
        if !refresh.success() {
            debug!(code = refresh.code, "tmux refresh-client failed");
        }
        refresh.success()
    }
}
