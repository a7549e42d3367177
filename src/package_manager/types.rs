//! PackageManager 相关数据类型定义

use serde::Deserialize;
use std::process::Output;
use thiserror::Error;

/// 单次外部命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// 因超时被杀死
    pub timed_out: bool,
}

impl CommandResult {
    /// 进程正常结束（无论退出码）
    pub fn from_output(output: Output) -> Self {
        Self {
            succeeded: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            // 被信号终止时没有退出码
            exit_code: output.status.code().unwrap_or(-1),
            timed_out: false,
        }
    }

    /// 启动失败 / 超时等情况，错误信息放入 stderr
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: message.into(),
            exit_code: -1,
            timed_out: false,
        }
    }

    pub fn timeout(err: &PipError) -> Self {
        Self {
            timed_out: true,
            ..Self::failure(err.to_string())
        }
    }
}

/// `pip list --format=json` 中的一项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    /// 仅 `--outdated` 输出中存在
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// 单个包的升级 / 卸载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub package_name: String,
    pub succeeded: bool,
    pub detail: String,
}

impl OperationOutcome {
    /// 汇总列表中显示的一行
    pub fn summary_line(&self) -> String {
        match (self.succeeded, self.detail.is_empty()) {
            (_, true) => self.package_name.clone(),
            (true, false) => format!("{} ({})", self.package_name, self.detail),
            (false, false) => format!("{} - {}", self.package_name, self.detail),
        }
    }
}

/// 批量操作的结果汇总，按执行顺序分别保存成功与失败项
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub successes: Vec<OperationOutcome>,
    pub failures: Vec<OperationOutcome>,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: OperationOutcome) {
        if outcome.succeeded {
            self.successes.push(outcome);
        } else {
            self.failures.push(outcome);
        }
    }

    /// 完成率（百分比）。没有任何操作时视为 100%
    pub fn completion_rate(&self) -> f64 {
        let total = self.successes.len() + self.failures.len();
        if total == 0 {
            return 100.0;
        }
        self.successes.len() as f64 / total as f64 * 100.0
    }
}

/// 包管理层内部的错误分类，不会越过控制器向上传播
#[derive(Debug, Error)]
pub enum PipError {
    #[error("Could not find pip. Please ensure pip is installed.")]
    ExecutableNotFound,

    #[error("Command timed out after {secs} seconds: {command}")]
    Timeout { secs: u64, command: String },

    #[error("{command} exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to parse pip output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, ok: bool) -> OperationOutcome {
        OperationOutcome {
            package_name: name.to_string(),
            succeeded: ok,
            detail: String::new(),
        }
    }

    #[test]
    fn completion_rate_counts_successes() {
        let mut summary = BatchSummary::default();
        for name in ["a", "b", "c"] {
            summary.record(outcome(name, true));
        }
        summary.record(outcome("d", false));
        assert_eq!(summary.completion_rate(), 75.0);
        assert_eq!(format!("{:.1}", summary.completion_rate()), "75.0");
    }

    #[test]
    fn empty_batch_is_complete() {
        let summary = BatchSummary::default();
        assert_eq!(summary.completion_rate(), 100.0);
    }

    #[test]
    fn record_keeps_order() {
        let mut summary = BatchSummary::default();
        summary.record(outcome("b", false));
        summary.record(outcome("a", true));
        summary.record(outcome("c", false));
        let failed: Vec<_> = summary.failures.iter().map(|o| o.package_name.as_str()).collect();
        assert_eq!(failed, ["b", "c"]);
        assert_eq!(summary.successes.len(), 1);
    }

    #[test]
    fn summary_line_formats() {
        let ok = OperationOutcome {
            package_name: "requests".into(),
            succeeded: true,
            detail: "Successfully installed requests-2.32.3".into(),
        };
        assert_eq!(
            ok.summary_line(),
            "requests (Successfully installed requests-2.32.3)"
        );
        let bad = OperationOutcome {
            package_name: "numpy".into(),
            succeeded: false,
            detail: "ERROR: boom".into(),
        };
        assert_eq!(bad.summary_line(), "numpy - ERROR: boom");
        assert_eq!(outcome("six", true).summary_line(), "six");
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let json = r#"{"name":"pip","version":"23.0","latest_version":"24.0","latest_filetype":"wheel"}"#;
        let rec: PackageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.latest_version.as_deref(), Some("24.0"));
        assert_eq!(rec.summary, None);
    }
}
