//! 外部命令执行（带超时）

use super::types::{CommandResult, PipError};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// 执行外部命令的抽象。实现方不返回错误，所有失败都写进 `CommandResult`
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, argv: &[String], timeout: Duration) -> CommandResult;
}

/// 基于 tokio::process 的真实实现
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, argv: &[String], timeout: Duration) -> CommandResult {
        let Some((program, args)) = argv.split_first() else {
            return CommandResult::failure("Error running command: empty command");
        };
        let display = argv.join(" ");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // 超时后 future 被丢弃，子进程随之被杀死
            .kill_on_drop(true);
        // 独立进程组：菜单里的 Ctrl+C 不会传给正在运行的 pip
        #[cfg(unix)]
        cmd.process_group(0);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                log::debug!("spawn `{}` failed: {}", display, e);
                return CommandResult::failure(format!("Error running command: {}", e));
            }
        };

        let pid = child.id();
        let started = Instant::now();
        let result = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => CommandResult::from_output(output),
            Ok(Err(e)) => CommandResult::failure(format!("Error running command: {}", e)),
            Err(_) => {
                let err = PipError::Timeout {
                    secs: timeout.as_secs(),
                    command: display.clone(),
                };
                log::warn!("{}", err);
                // kill_on_drop 只杀直接子进程，pip 派生的构建进程要按进程组杀
                kill_process_group(pid);
                CommandResult::timeout(&err)
            }
        };

        log::debug!(
            "`{}` finished in {:?} (exit={})",
            display,
            started.elapsed(),
            result.exit_code
        );
        result
    }
}

#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pid) = pid else { return };
    // process_group(0) 使 pgid == pid
    let ret = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
    if ret != 0 {
        log::debug!(
            "kill process group {} failed: {}",
            pid,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}
