//! 文本表格与汇总的排版，全部渲染成 String 再输出

use super::theme::{Role, Theme};
use crate::package_manager::{BatchSummary, PackageRecord};
use std::fmt::Write;

/// 无法获取终端宽度时的默认值
pub const DEFAULT_WIDTH: usize = 80;
/// 名称 / 版本列的最小宽度
const MIN_COLUMN: usize = 10;

pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .ok()
        .filter(|&cols| cols > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

/// 整行分隔线
pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// 按终端宽度居中，过长的行不缩进
pub fn center(line: &str, width: usize) -> String {
    let padding = width.saturating_sub(line.chars().count()) / 2;
    format!("{}{}", " ".repeat(padding), line)
}

/// 按字符截断，不加省略号
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0).max(MIN_COLUMN)
}

/// 通用包列表：# | 名称 | 版本 | 描述
pub fn render_packages(packages: &[PackageRecord], title: &str, width: usize, theme: Theme) -> String {
    let name_width = column_width(packages.iter().map(|p| p.name.as_str()));
    let version_width = column_width(packages.iter().map(|p| p.version.as_str()));
    let desc_width = width.saturating_sub(name_width + version_width + 10);

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", theme.paint(Role::Bold, title));
    let _ = writeln!(out, "{}", rule(width));
    let heading = format!(
        "{:<4} {:<name_width$} {:<version_width$} Description",
        "#", "Package Name", "Version"
    );
    let _ = writeln!(out, "{}", theme.paint(Role::Bold, &heading));
    let _ = writeln!(out, "{}", rule(width));

    for (i, pkg) in packages.iter().enumerate() {
        let description = match (&pkg.latest_version, &pkg.summary) {
            (Some(latest), _) => latest.clone(),
            (None, Some(summary)) => clip(summary, desc_width),
            (None, None) => String::new(),
        };
        let row = format!(
            "{:<4} {:<name_width$} {:<version_width$} {}",
            i + 1,
            pkg.name,
            pkg.version,
            description
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let _ = writeln!(out, "{}", rule(width));
    out
}

/// 可升级包列表：# | 名称 | 当前版本 | 最新版本 | 描述
pub fn render_outdated(packages: &[PackageRecord], width: usize, theme: Theme) -> String {
    let name_width = column_width(packages.iter().map(|p| p.name.as_str()));
    let version_width = MIN_COLUMN;
    let desc_width = width.saturating_sub(name_width + version_width * 2 + 15);

    let mut out = String::new();
    let _ = writeln!(out, "\n{}", theme.paint(Role::Bold, "OUTDATED PACKAGES"));
    let _ = writeln!(out, "{}", rule(width));
    let heading = format!(
        "{:<4} {:<name_width$} {:<version_width$} {:<version_width$} Description",
        "#", "Package Name", "Current", "Latest"
    );
    let _ = writeln!(out, "{}", theme.paint(Role::Bold, &heading));
    let _ = writeln!(out, "{}", rule(width));

    for (i, pkg) in packages.iter().enumerate() {
        let latest = pkg.latest_version.as_deref().unwrap_or("N/A");
        let summary = clip(pkg.summary.as_deref().unwrap_or(""), desc_width);
        let row = format!(
            "{:<4} {:<name_width$} {:<version_width$} {:<version_width$} {}",
            i + 1,
            pkg.name,
            pkg.version,
            latest,
            summary
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let _ = writeln!(out, "{}", rule(width));
    out
}

/// 批量操作汇总的文案
#[derive(Debug, Clone, Copy)]
pub struct SummaryLabels {
    pub title: &'static str,
    pub succeeded: &'static str,
    pub failed: &'static str,
    /// 为 None 时不显示完成率
    pub rate: Option<&'static str>,
}

pub const UPDATE_SUMMARY: SummaryLabels = SummaryLabels {
    title: "PACKAGE UPDATE SUMMARY",
    succeeded: "Successfully updated",
    failed: "Failed to update",
    rate: Some("Update completion rate"),
};

pub const REMOVAL_SUMMARY: SummaryLabels = SummaryLabels {
    title: "PACKAGE REMOVAL SUMMARY",
    succeeded: "Successfully removed",
    failed: "Failed to remove",
    rate: None,
};

pub fn render_summary(
    summary: &BatchSummary,
    labels: SummaryLabels,
    width: usize,
    theme: Theme,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule(width));
    let _ = writeln!(out, "{}", theme.paint(Role::Bold, labels.title));
    let _ = writeln!(out, "{}", rule(width));

    if !summary.successes.is_empty() {
        let heading = format!("✓ {} ({}):", labels.succeeded, summary.successes.len());
        let _ = writeln!(out, "\n{}", theme.paint(Role::Success, &heading));
        for outcome in &summary.successes {
            let _ = writeln!(out, "  • {}", outcome.summary_line());
        }
    }

    if !summary.failures.is_empty() {
        let heading = format!("✗ {} ({}):", labels.failed, summary.failures.len());
        let _ = writeln!(out, "\n{}", theme.paint(Role::Error, &heading));
        for outcome in &summary.failures {
            let _ = writeln!(out, "  • {}", outcome.summary_line());
        }
    }

    let _ = writeln!(out, "\n{}", rule(width));
    if let Some(rate_label) = labels.rate {
        let _ = writeln!(out, "{}: {:.1}%", rate_label, summary.completion_rate());
        let _ = writeln!(out, "{}", rule(width));
    }
    out
}
