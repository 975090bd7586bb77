//! 基础设施层 - 外部命令、环境变量、tmux

pub mod env;
pub mod host;
pub mod tmux;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use host::{CommandOutput, HostCommand, SystemHost};
pub use tmux::TmuxClient;
