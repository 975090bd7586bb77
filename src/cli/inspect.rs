//! preview / route 命令 - 调试用，只计算不发送

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::hook::{parse_event, read_input};
use super::output::format_output;
use crate::config::NotifyConfig;
use crate::infra::{ProcessEnv, SystemHost, TmuxClient};
use crate::notification::{ChannelContext, ChannelResolver, NotificationDispatcher, Route};

/// preview 命令参数
#[derive(Args, Debug, Clone, Default)]
pub struct PreviewArgs {
    /// Read the event JSON from this file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// 打印将要发送的通知内容
pub fn handle_preview(args: PreviewArgs, config: &NotifyConfig) -> Result<String> {
    let input = read_input(args.input.as_deref())?;
    let event = parse_event(&input);
    let content = NotificationDispatcher::from_config(config).preview(&event.messages);
    Ok(format_output(&content))
}

#[derive(Serialize)]
struct RouteReport {
    context: ChannelContext,
    route: Route,
}

/// 打印当前环境下的路由判定
pub fn handle_route(config: &NotifyConfig) -> Result<String> {
    let tmux = TmuxClient::new(Arc::new(SystemHost::new())).with_bin(config.tmux_bin.clone());
    let resolver = ChannelResolver::new(Arc::new(ProcessEnv), tmux);
    let context = resolver.context();
    let route = context.route();
    Ok(format_output(&RouteReport { context, route }))
}
