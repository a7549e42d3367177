use super::input::{parse_selection, Answer};
use super::layout;
use super::state::{App, Flow, PRESS_ENTER};
use super::theme::Role;
use crate::package_manager::{
    BatchSummary, CommandRunner, Executable, Level, ListKind, PackageManager, Reporter,
};

const SELECT_PROMPT: &str =
    "\nEnter package number(s) to remove (comma-separated) or 'q' to return: ";

/// 菜单 4：按序号卸载包
pub async fn remove_selected<R: CommandRunner, P: Reporter>(app: &mut App<R, P>) -> Flow {
    let located = app.pm.locate(&app.console).await;
    let Ok(exe) = located else {
        return app.pause(PRESS_ENTER).await;
    };

    let packages = app.pm.query(&exe, ListKind::Installed, &app.console).await;
    if packages.is_empty() {
        return app.pause(PRESS_ENTER).await;
    }

    let width = layout::terminal_width();
    print!(
        "{}",
        layout::render_packages(&packages, "INSTALLED PACKAGES", width, app.theme)
    );

    let indices = loop {
        let input = match app.prompter.ask(SELECT_PROMPT).await {
            Answer::Line(line) => line,
            other => return other.into(),
        };
        if input.trim().eq_ignore_ascii_case("q") {
            return Flow::Back;
        }

        let selection = parse_selection(&input, packages.len());
        for n in &selection.out_of_range {
            app.console
                .report(Level::Error, &format!("Invalid package number: {}", n));
        }
        for entry in &selection.non_numeric {
            app.console
                .report(Level::Error, &format!("Not a package number: {}", entry));
        }
        if selection.indices.is_empty() {
            app.console
                .report(Level::Error, "No valid package numbers provided");
            continue;
        }
        break selection.indices;
    };

    let names: Vec<&str> = indices
        .iter()
        .map(|&i| packages[i - 1].name.as_str())
        .collect();

    println!("\n{}", app.theme.paint(Role::Bold, "REMOVING PACKAGES"));
    println!("{}", layout::rule(width));

    let summary = run_removals(&app.pm, &exe, &names, &app.console).await;

    print!(
        "{}",
        layout::render_summary(&summary, layout::REMOVAL_SUMMARY, layout::terminal_width(), app.theme)
    );
    app.pause(PRESS_ENTER).await
}

/// 按选择顺序逐个卸载
pub async fn run_removals<R: CommandRunner, P: Reporter>(
    pm: &PackageManager<R>,
    exe: &Executable,
    names: &[&str],
    reporter: &P,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for name in names {
        reporter.report(Level::Processing, &format!("Removing package: {}", name));
        let outcome = pm.remove(exe, name, reporter).await;
        if outcome.succeeded {
            reporter.report(Level::Success, &format!("Successfully removed {}", name));
        } else {
            reporter.report(
                Level::Error,
                &format!("Failed to remove {}: {}", name, outcome.detail),
            );
        }
        summary.record(outcome);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::package_manager::reporter::testing::RecordingReporter;
    use crate::package_manager::runner::testing::{fail, ok, ScriptedRunner};
    use crate::package_manager::Candidate;
    use crate::tui::input::testing::line;
    use crate::tui::state::testing::scripted_app;

    const INSTALLED: &str = r#"[{"name":"attrs","version":"23.2.0"},{"name":"six","version":"1.16.0"},{"name":"wheel","version":"0.43.0"}]"#;

    fn installed_responses() -> Vec<crate::package_manager::CommandResult> {
        vec![ok("pip 24.0 from /usr/lib/python3/site-packages/pip (python 3.12)"), ok(INSTALLED)]
    }

    #[tokio::test]
    async fn reprompts_until_a_valid_number() {
        let mut responses = installed_responses();
        responses.push(ok("Successfully uninstalled six-1.16.0"));
        let mut app = scripted_app(
            responses,
            vec![line("9"), line("x"), line("2"), line("")],
        );

        let flow = remove_selected(&mut app).await;

        assert_eq!(flow, Flow::Back);
        assert_eq!(
            app.pm.runner().calls()[2..],
            [vec!["pip", "uninstall", "-y", "six"]]
        );
        let errors: Vec<String> = app
            .console
            .entries()
            .into_iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message)
            .collect();
        assert_eq!(
            errors,
            [
                "Invalid package number: 9",
                "No valid package numbers provided",
                "Not a package number: x",
                "No valid package numbers provided",
            ]
        );
    }

    #[tokio::test]
    async fn q_returns_without_removing() {
        let mut app = scripted_app(installed_responses(), vec![line(" Q ")]);

        assert_eq!(remove_selected(&mut app).await, Flow::Back);
        assert_eq!(app.pm.runner().calls().len(), 2);
        assert_eq!(app.console.count(Level::Error), 0);
    }

    #[tokio::test]
    async fn partial_selection_removes_valid_entries_in_order() {
        let mut responses = installed_responses();
        responses.push(ok("Successfully uninstalled wheel-0.43.0"));
        responses.push(ok("Successfully uninstalled attrs-23.2.0"));
        let mut app = scripted_app(responses, vec![line("3,7,x,1"), line("")]);

        remove_selected(&mut app).await;

        assert_eq!(
            app.pm.runner().calls()[2..],
            [
                vec!["pip", "uninstall", "-y", "wheel"],
                vec!["pip", "uninstall", "-y", "attrs"],
            ]
        );
        assert_eq!(app.console.count(Level::Success), 2);
    }

    #[tokio::test]
    async fn eof_at_selection_closes() {
        let mut app = scripted_app(installed_responses(), vec![]);

        assert_eq!(remove_selected(&mut app).await, Flow::Closed);
        assert_eq!(app.pm.runner().calls().len(), 2);
    }

    #[tokio::test]
    async fn removes_in_selection_order() {
        let runner = ScriptedRunner::new(vec![
            ok("Found existing installation: six 1.16.0\nUninstalling six-1.16.0:\n  Successfully uninstalled six-1.16.0\n"),
            fail("WARNING: Skipping attrs as it is not installed."),
        ]);
        let pm = PackageManager::new(runner, &Config::default());
        let reporter = RecordingReporter::default();
        let exe = Executable {
            candidate: Candidate::parse("pip3").unwrap(),
            version: "pip 24.0".into(),
        };

        let summary = run_removals(&pm, &exe, &["six", "attrs"], &reporter).await;

        assert_eq!(
            pm.runner().calls(),
            vec![
                vec!["pip3", "uninstall", "-y", "six"],
                vec!["pip3", "uninstall", "-y", "attrs"],
            ]
        );
        assert_eq!(summary.successes[0].detail, "Successfully uninstalled six-1.16.0");
        assert_eq!(summary.failures[0].package_name, "attrs");
        assert_eq!(
            summary.failures[0].summary_line(),
            "attrs - WARNING: Skipping attrs as it is not installed."
        );
    }
}
