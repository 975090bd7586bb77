//! 渠道判定 - 决定走 tmux 状态栏还是桌面通知，以及是否需要静默
//!
//! 所有不确定的情况都倾向于发送通知：拿不到 pane id、拿不到客户端列表，
//! 都按"需要通知"处理。

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::infra::env::EnvSource;
use crate::infra::tmux::TmuxClient;

/// 渠道状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChannelState {
    /// 不在 tmux 中
    NoMultiplexer,
    /// 在 tmux 中，但无法确定当前 pane
    MultiplexerUnknownPane,
    /// 在 tmux 中，pane 已知
    MultiplexerKnownPane { pane_id: String },
}

impl ChannelState {
    /// 根据环境变量判定（每次调用都重新读取）
    pub fn detect(env: &dyn EnvSource) -> Self {
        if !env.in_tmux() {
            return Self::NoMultiplexer;
        }
        match env.tmux_pane() {
            Some(pane_id) => Self::MultiplexerKnownPane { pane_id },
            None => Self::MultiplexerUnknownPane,
        }
    }
}

/// 一次分发时的渠道上下文快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelContext {
    pub in_multiplexer: bool,
    pub pane_id: Option<String>,
    /// 所有已连接客户端聚焦的 pane；只有 pane 已知时才查询
    pub active_client_panes: Vec<String>,
}

impl ChannelContext {
    pub fn capture(env: &dyn EnvSource, tmux: &TmuxClient) -> Self {
        let state = ChannelState::detect(env);
        let active_client_panes = match &state {
            ChannelState::MultiplexerKnownPane { .. } => tmux.list_client_panes(),
            _ => Vec::new(),
        };
        let (in_multiplexer, pane_id) = match state {
            ChannelState::NoMultiplexer => (false, None),
            ChannelState::MultiplexerUnknownPane => (true, None),
            ChannelState::MultiplexerKnownPane { pane_id } => (true, Some(pane_id)),
        };
        Self {
            in_multiplexer,
            pane_id,
            active_client_panes,
        }
    }

    pub fn state(&self) -> ChannelState {
        match (self.in_multiplexer, &self.pane_id) {
            (false, _) => ChannelState::NoMultiplexer,
            (true, None) => ChannelState::MultiplexerUnknownPane,
            (true, Some(pane_id)) => ChannelState::MultiplexerKnownPane {
                pane_id: pane_id.clone(),
            },
        }
    }

    /// 计算路由
    ///
    /// 客户端列表为空（无客户端或查询失败）时默认通知。
    pub fn route(&self) -> Route {
        match self.state() {
            ChannelState::NoMultiplexer => Route::Desktop,
            ChannelState::MultiplexerUnknownPane => Route::Tmux { pane_id: None },
            ChannelState::MultiplexerKnownPane { pane_id } => {
                if self.active_client_panes.contains(&pane_id) {
                    Route::Suppressed { pane_id }
                } else {
                    Route::Tmux {
                        pane_id: Some(pane_id),
                    }
                }
            }
        }
    }
}

/// 路由结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    /// OSC 777 桌面通知
    Desktop,
    /// tmux display-message
    Tmux { pane_id: Option<String> },
    /// 用户正在看这个 pane，不通知
    Suppressed { pane_id: String },
}

/// 渠道判定器
pub struct ChannelResolver {
    env: Arc<dyn EnvSource>,
    tmux: TmuxClient,
}

impl ChannelResolver {
    pub fn new(env: Arc<dyn EnvSource>, tmux: TmuxClient) -> Self {
        Self { env, tmux }
    }

    pub fn context(&self) -> ChannelContext {
        ChannelContext::capture(self.env.as_ref(), &self.tmux)
    }

    pub fn resolve(&self) -> Route {
        let context = self.context();
        let route = context.route();
        debug!(?context, ?route, "Channel resolved");
        route
    }
}
