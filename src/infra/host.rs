//! 外部命令执行能力 - 所有 tmux 交互都经过这里

use std::process::Command;
use tracing::debug;

/// 外部命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// 标准输出（lossy UTF-8）
    pub stdout: String,
    /// 退出码；无法启动或被信号终止时为 -1
    pub code: i32,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            code,
        }
    }

    /// 启动失败时使用的结果
    pub fn failed() -> Self {
        Self::new("", -1)
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// 执行外部命令的能力（可被测试替身替换）
///
/// 实现不应返回错误：任何失败都用非零退出码表示。
pub trait HostCommand: Send + Sync {
    fn exec(&self, program: &str, args: &[&str]) -> CommandOutput;
}

/// 真实进程执行
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostCommand for SystemHost {
    fn exec(&self, program: &str, args: &[&str]) -> CommandOutput {
        match Command::new(program).args(args).output() {
            Ok(output) => {
                let code = output.status.code().unwrap_or(-1);
                debug!(program = %program, ?args, code, "Command finished");
                CommandOutput::new(String::from_utf8_lossy(&output.stdout), code)
            }
            Err(e) => {
                debug!(program = %program, ?args, error = %e, "Command failed to start");
                CommandOutput::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_reports_failure_code() {
        let host = SystemHost::new();
        let output = host.exec("pi-notify-definitely-missing-binary", &["--version"]);
        assert_eq!(output, CommandOutput::failed());
        assert!(!output.success());
    }

    #[test]
    fn test_command_output_success() {
        assert!(CommandOutput::new("%1\n", 0).success());
        assert!(!CommandOutput::new("", 1).success());
    }
}
