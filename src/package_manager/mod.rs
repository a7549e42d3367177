//! 包管理器模块 — 对 pip 的封装

pub mod parser;
pub mod reporter;
pub mod runner;
pub mod types;

pub use reporter::{Level, Reporter};
pub use runner::{CommandRunner, SystemRunner};
pub use types::{BatchSummary, CommandResult, OperationOutcome, PackageRecord, PipError};

use crate::config::Config;
use parser::{failure_detail, find_marker_line, parse_package_list, parse_version_line};
use std::time::Duration;

/// 一种调用 pip 的方式，如 `pip3` 或 `python3 -m pip`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    prefix: Vec<String>,
}

impl Candidate {
    /// 按空白拆分；空字符串返回 None
    pub fn parse(invocation: &str) -> Option<Self> {
        let prefix: Vec<String> = invocation.split_whitespace().map(str::to_string).collect();
        if prefix.is_empty() {
            None
        } else {
            Some(Self { prefix })
        }
    }

    pub fn label(&self) -> String {
        self.prefix.join(" ")
    }

    /// 拼接出完整 argv
    pub fn command(&self, args: &[&str]) -> Vec<String> {
        let mut argv = self.prefix.clone();
        argv.extend(args.iter().map(|s| s.to_string()));
        argv
    }
}

/// 已确认可用的 pip 调用方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub candidate: Candidate,
    pub version: String,
}

/// 列表查询类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Installed,
    Outdated,
}

impl ListKind {
    fn args(self) -> &'static [&'static str] {
        match self {
            ListKind::Installed => &["list", "--format=json"],
            ListKind::Outdated => &["list", "--outdated", "--format=json"],
        }
    }

    fn progress_message(self) -> &'static str {
        match self {
            ListKind::Installed => "Getting installed packages",
            ListKind::Outdated => "Checking for outdated packages",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ListKind::Installed => "installed",
            ListKind::Outdated => "outdated",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackageManager<R = SystemRunner> {
    runner: R,
    candidates: Vec<Candidate>,
    command_timeout: Duration,
    upgrade_timeout: Duration,
    version_timeout: Duration,
}

impl<R: CommandRunner> PackageManager<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            candidates: config
                .candidates
                .iter()
                .filter_map(|c| Candidate::parse(c))
                .collect(),
            command_timeout: config.command_timeout(),
            upgrade_timeout: config.upgrade_timeout(),
            version_timeout: config.version_check_timeout(),
        }
    }

    #[cfg(test)]
    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    // ===== 探测 =====

    /// 按优先级逐个执行 `--version`，返回第一个成功的调用方式
    pub async fn locate<P: Reporter>(&self, reporter: &P) -> Result<Executable, PipError> {
        // 超时信息等动画结束后再输出
        let (found, timeouts) = reporter
            .with_progress("Locating pip executable", async {
                let mut timeouts = Vec::new();
                for candidate in &self.candidates {
                    let result = self
                        .runner
                        .run(&candidate.command(&["--version"]), self.version_timeout)
                        .await;
                    if result.succeeded {
                        let exe = Executable {
                            candidate: candidate.clone(),
                            version: parse_version_line(&result.stdout),
                        };
                        return (Some(exe), timeouts);
                    }
                    if result.timed_out {
                        timeouts.push(result.stderr.trim().to_string());
                    }
                    log::debug!("candidate `{}` unavailable: {}", candidate.label(), result.stderr.trim());
                }
                (None, timeouts)
            })
            .await;

        for message in &timeouts {
            reporter.report(Level::Warning, message);
        }

        match found {
            Some(exe) => {
                reporter.report(
                    Level::Info,
                    &format!("Using {}: {}", exe.candidate.label(), exe.version),
                );
                Ok(exe)
            }
            None => {
                let err = PipError::ExecutableNotFound;
                reporter.report(Level::Error, &err.to_string());
                Err(err)
            }
        }
    }

    // ===== 查询 =====

    /// 所有已安装包；找不到 pip 时返回空列表
    pub async fn list_installed<P: Reporter>(&self, reporter: &P) -> Vec<PackageRecord> {
        match self.locate(reporter).await {
            Ok(exe) => self.query(&exe, ListKind::Installed, reporter).await,
            Err(_) => Vec::new(),
        }
    }

    /// 可升级的包；找不到 pip 时返回空列表
    pub async fn list_outdated<P: Reporter>(&self, reporter: &P) -> Vec<PackageRecord> {
        match self.locate(reporter).await {
            Ok(exe) => self.query(&exe, ListKind::Outdated, reporter).await,
            Err(_) => Vec::new(),
        }
    }

    /// 用已探测到的 pip 执行列表查询。失败时报告并返回空列表
    pub async fn query<P: Reporter>(
        &self,
        exe: &Executable,
        kind: ListKind,
        reporter: &P,
    ) -> Vec<PackageRecord> {
        let argv = exe.candidate.command(kind.args());
        let result = reporter
            .with_progress(kind.progress_message(), self.runner.run(&argv, self.command_timeout))
            .await;

        if !result.succeeded {
            log::warn!(
                "{}",
                PipError::CommandFailed {
                    command: argv.join(" "),
                    code: result.exit_code,
                    stderr: result.stderr.trim().to_string(),
                }
            );
            reporter.report(
                Level::Error,
                &format!(
                    "Failed to get {} packages: {}",
                    kind.noun(),
                    result.stderr.trim()
                ),
            );
            return Vec::new();
        }

        let records = match parse_package_list(&result.stdout) {
            Ok(records) => records,
            Err(e) => {
                reporter.report(Level::Error, &e.to_string());
                return Vec::new();
            }
        };

        match (kind, records.is_empty()) {
            (ListKind::Installed, true) => {
                reporter.report(Level::Warning, "No packages are installed!")
            }
            (ListKind::Outdated, true) => {
                reporter.report(Level::Success, "All packages are up to date!")
            }
            (_, false) => reporter.report(
                Level::Info,
                &format!("Found {} {} package(s)", records.len(), kind.noun()),
            ),
        }
        records
    }

    // ===== 变更 =====

    /// 升级单个包到最新版本
    pub async fn upgrade<P: Reporter>(
        &self,
        exe: &Executable,
        name: &str,
        reporter: &P,
    ) -> OperationOutcome {
        let argv = exe.candidate.command(&["install", "--upgrade", name]);
        let result = reporter
            .with_progress(
                &format!("Updating {}", name),
                self.runner.run(&argv, self.upgrade_timeout),
            )
            .await;
        classify(name, &result, "Successfully installed")
    }

    /// 卸载单个包
    pub async fn remove<P: Reporter>(
        &self,
        exe: &Executable,
        name: &str,
        reporter: &P,
    ) -> OperationOutcome {
        let argv = exe.candidate.command(&["uninstall", "-y", name]);
        let result = reporter
            .with_progress(
                &format!("Removing {}", name),
                self.runner.run(&argv, self.command_timeout),
            )
            .await;
        classify(name, &result, "Successfully uninstalled")
    }
}

fn classify(name: &str, result: &CommandResult, marker: &str) -> OperationOutcome {
    let detail = if result.succeeded {
        find_marker_line(&result.stdout, marker).unwrap_or_default()
    } else {
        failure_detail(&result.stderr, &result.stdout)
    };
    OperationOutcome {
        package_name: name.to_string(),
        succeeded: result.succeeded,
        detail,
    }
}
