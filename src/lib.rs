//! pi-notify - 编码 agent 回合结束通知
//!
//! 在 tmux 中通过状态栏消息提醒（当前 pane 正被查看时静默），
//! 否则回退到 OSC 777 桌面通知。

pub mod cli;
pub mod config;
pub mod infra;
pub mod notification;

pub use config::NotifyConfig;
pub use infra::{CommandOutput, EnvSource, HostCommand, MapEnv, ProcessEnv, SystemHost, TmuxClient};
pub use notification::{
    DispatchOutcome, NotificationContent, NotificationDispatcher, Route, TurnEvent,
};
