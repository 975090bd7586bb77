//! infra 模块测试

use pi_notify::infra::env::{TMUX_PANE_VAR, TMUX_VAR};
use pi_notify::infra::{CommandOutput, EnvSource, HostCommand, MapEnv, SystemHost, TmuxClient};
use std::sync::Arc;

#[test]
fn test_tmux_client_bin_defaults_and_overrides() {
    let tmux = TmuxClient::new(Arc::new(SystemHost::new()));
    assert_eq!(tmux.bin(), "tmux");

    let tmux = tmux.with_bin("/opt/homebrew/bin/tmux");
    assert_eq!(tmux.bin(), "/opt/homebrew/bin/tmux");
}

#[test]
fn test_system_host_reports_exit_code() {
    let host = SystemHost::new();
    let output = host.exec("sh", &["-c", "printf '%%1\\n'; exit 3"]);
    assert_eq!(output, CommandOutput::new("%1\n", 3));
}

#[test]
fn test_map_env_markers() {
    let env = MapEnv::new()
        .with(TMUX_VAR, "/tmp/tmux-1000/default,1,0")
        .with(TMUX_PANE_VAR, "%12");
    assert!(env.in_tmux());
    assert_eq!(env.tmux_pane().as_deref(), Some("%12"));
}
