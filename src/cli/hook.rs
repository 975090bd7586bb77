// src/cli/hook.rs
//! hook 命令处理
//!
//! 处理 agent 的 `agent_end` 事件：从 stdin（或文件）读取回合消息并发送通知。

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::NotifyConfig;
use crate::notification::{DispatchOutcome, NotificationDispatcher, TurnEvent};

/// hook 命令参数
#[derive(Args, Debug, Clone, Default)]
pub struct HookArgs {
    /// Read the event JSON from this file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Resolve and format, but do not send anything
    #[arg(long)]
    pub dry_run: bool,
}

/// 读取事件输入
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file: {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read event from stdin")?;
            Ok(input)
        }
    }
}

/// 解析事件；无法解析时当作空回合处理
pub fn parse_event(input: &str) -> TurnEvent {
    if input.trim().is_empty() {
        return TurnEvent::default();
    }
    match TurnEvent::parse(input) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "Invalid event JSON, treating as empty turn");
            TurnEvent::default()
        }
    }
}

/// 处理 hook 事件
pub fn handle_hook(args: HookArgs, config: &NotifyConfig) -> Result<DispatchOutcome> {
    let input = read_input(args.input.as_deref())?;
    let event = parse_event(&input);
    info!(
        event_type = ?event.event_type,
        messages = event.messages.len(),
        "Received turn-end event"
    );

    let dispatcher = NotificationDispatcher::from_config(config).with_dry_run(args.dry_run);
    let outcome = dispatcher.dispatch(&event.messages);
    info!(?outcome, "Dispatch finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_invalid_json_is_empty() {
        let event = parse_event("not json at all");
        assert!(event.messages.is_empty());
        assert_eq!(event.last_assistant_text(), None);
    }

    #[test]
    fn test_parse_event_blank_input() {
        assert!(parse_event("  \n").messages.is_empty());
    }

    #[test]
    fn test_parse_event_agent_end() {
        let payload = r#"{"type":"agent_end","messages":[{"role":"assistant","content":"ok"}]}"#;
        assert_eq!(parse_event(payload).last_assistant_text(), Some("ok".to_string()));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/event.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/event.json"));
    }
}
