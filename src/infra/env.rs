//! 环境变量访问 - 隔离进程环境，测试可注入合成环境

use std::collections::HashMap;

/// tmux 会话标记
pub const TMUX_VAR: &str = "TMUX";
/// 当前 pane 标识
pub const TMUX_PANE_VAR: &str = "TMUX_PANE";

/// 环境变量来源
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;

    /// 是否运行在 tmux 中（TMUX 非空）
    fn in_tmux(&self) -> bool {
        self.var(TMUX_VAR).is_some_and(|v| !v.is_empty())
    }

    /// 当前 pane id（去除空白后非空）
    fn tmux_pane(&self) -> Option<String> {
        let pane = self.var(TMUX_PANE_VAR)?;
        let pane = pane.trim();
        (!pane.is_empty()).then(|| pane.to_string())
    }
}

/// 读取真实进程环境
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// 合成环境
#[derive(Debug, Default, Clone)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tmux_var_is_not_tmux() {
        assert!(!MapEnv::new().in_tmux());
        assert!(!MapEnv::new().with(TMUX_VAR, "").in_tmux());
        assert!(MapEnv::new().with(TMUX_VAR, "/tmp/tmux-1000/default,1234,0").in_tmux());
    }

    #[test]
    fn test_tmux_pane_is_trimmed() {
        let env = MapEnv::new().with(TMUX_PANE_VAR, "  %3\n");
        assert_eq!(env.tmux_pane(), Some("%3".to_string()));

        let blank = MapEnv::new().with(TMUX_PANE_VAR, "   ");
        assert_eq!(blank.tmux_pane(), None);
    }
}
