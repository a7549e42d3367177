use super::layout;
use super::state::{App, Flow, PRESS_ENTER};
use crate::package_manager::{CommandRunner, Level, Reporter};

/// 菜单 1：列出所有已安装包
pub async fn list_installed<R: CommandRunner, P: Reporter>(app: &mut App<R, P>) -> Flow {
    let packages = app.pm.list_installed(&app.console).await;
    if packages.is_empty() {
        app.console.report(Level::Warning, "No packages to display");
    } else {
        let width = layout::terminal_width();
        print!(
            "{}",
            layout::render_packages(&packages, "INSTALLED PACKAGES", width, app.theme)
        );
    }
    app.pause(PRESS_ENTER).await
}

/// 菜单 2：列出可升级的包
pub async fn list_outdated<R: CommandRunner, P: Reporter>(app: &mut App<R, P>) -> Flow {
    let packages = app.pm.list_outdated(&app.console).await;
    if packages.is_empty() {
        app.console.report(Level::Success, "No outdated packages to display");
    } else {
        let width = layout::terminal_width();
        print!("{}", layout::render_outdated(&packages, width, app.theme));
    }
    app.pause(PRESS_ENTER).await
}
