//! pi-notify CLI
//!
//! agent 回合结束时发送通知（tmux 状态栏或 OSC 777 桌面通知）

use anyhow::Result;
use clap::{Parser, Subcommand};
use pi_notify::cli::{handle_hook, handle_preview, handle_route, HookArgs, PreviewArgs};
use pi_notify::config::NotifyConfig;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pi-notify")]
#[command(about = "pi-notify - agent 回合结束通知")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/pi-notify/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 处理 agent_end 事件并发送通知（从 stdin 读取 JSON）
    Hook(HookArgs),
    /// 打印将要发送的通知内容
    Preview(PreviewArgs),
    /// 打印当前环境下的渠道判定
    Route,
}

fn main() -> Result<()> {
    // 日志写 stderr，stdout 留给 OSC 777 序列
    // 例如: RUST_LOG=pi_notify=debug pi-notify hook
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pi_notify=warn"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NotifyConfig::load_or_default(path),
        None => NotifyConfig::load(),
    };
    debug!(?config, "Loaded config");

    match cli.command {
        Commands::Hook(args) => {
            handle_hook(args, &config)?;
        }
        Commands::Preview(args) => {
            println!("{}", handle_preview(args, &config)?);
        }
        Commands::Route => {
            println!("{}", handle_route(&config)?);
        }
    }

    Ok(())
}
