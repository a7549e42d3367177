use super::layout;
use super::state::{App, Flow, PRESS_ENTER};
use super::theme::Role;
use crate::package_manager::{
    BatchSummary, CommandRunner, Executable, Level, ListKind, PackageManager, PackageRecord,
    Reporter,
};
use std::time::Duration;

/// 菜单 3：升级全部过期包
pub async fn update_all<R: CommandRunner, P: Reporter>(app: &mut App<R, P>) -> Flow {
    let located = app.pm.locate(&app.console).await;
    let Ok(exe) = located else {
        return app.pause(PRESS_ENTER).await;
    };

    let outdated = app.pm.query(&exe, ListKind::Outdated, &app.console).await;
    if outdated.is_empty() {
        app.console
            .report(Level::Info, "No packages to update or package check failed");
        return app.pause(PRESS_ENTER).await;
    }

    let width = layout::terminal_width();
    print!("{}", layout::render_outdated(&outdated, width, app.theme));

    match app.pause("Press Enter to start updating all packages...").await {
        Flow::Back => {}
        other => return other,
    }

    println!("\n{}", app.theme.paint(Role::Bold, "UPDATING PACKAGES"));
    println!("{}", layout::rule(width));

    let summary = run_upgrades(&app.pm, &exe, &outdated, &app.console, app.upgrade_delay).await;

    print!(
        "{}",
        layout::render_summary(&summary, layout::UPDATE_SUMMARY, layout::terminal_width(), app.theme)
    );
    app.pause(PRESS_ENTER).await
}

/// 按列表顺序逐个升级，两次升级之间等待 delay
pub async fn run_upgrades<R: CommandRunner, P: Reporter>(
    pm: &PackageManager<R>,
    exe: &Executable,
    packages: &[PackageRecord],
    reporter: &P,
    delay: Duration,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (i, pkg) in packages.iter().enumerate() {
        let latest = pkg.latest_version.as_deref().unwrap_or("latest");
        reporter.report(
            Level::Processing,
            &format!(
                "Package: {} (Current: {}, Latest: {})",
                pkg.name, pkg.version, latest
            ),
        );

        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut outcome = pm.upgrade(exe, &pkg.name, reporter).await;
        if outcome.succeeded {
            reporter.report(Level::Success, &format!("Updated {} to {}", pkg.name, latest));
            // 汇总里显示版本变化
            outcome.detail = format!("{} → {}", pkg.version, latest);
        } else {
            reporter.report(
                Level::Error,
                &format!("Failed to update {}: {}", pkg.name, outcome.detail),
            );
        }
        summary.record(outcome);
    }

    summary
}
