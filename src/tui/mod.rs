mod console;
mod dashboard;
pub mod input;
mod layout;
mod query;
mod remove;
mod spinner;
pub mod state;
mod theme;
mod update;

use crate::config::Config;
use crate::package_manager::{CommandRunner, Level, PackageManager, Reporter, SystemRunner};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use input::Answer;
use state::{App, Flow, MenuChoice, PRESS_ENTER};
use std::io;
use theme::{Role, Theme};

pub async fn run(config: Config) -> Result<()> {
    let theme = Theme::detect(config.color);
    let pm = PackageManager::new(SystemRunner, &config);
    let mut app = App::new(pm, theme, config.upgrade_delay());
    menu_loop(&mut app).await
}

/// 主循环：选择 5、EOF 或出错时退出
async fn menu_loop<R: CommandRunner, P: Reporter>(app: &mut App<R, P>) -> Result<()> {
    let theme = app.theme;
    loop {
        clear_screen()?;
        let width = layout::terminal_width();
        print!("{}", dashboard::render_header(width, theme));
        print!("{}", dashboard::render_menu(width, theme));

        let prompt = format!("\nEnter your choice (1-{}): ", MenuChoice::ALL.len());
        let flow = match app.prompter.ask(&prompt).await {
            Answer::Line(input) => match MenuChoice::parse(&input) {
                Some(MenuChoice::Exit) => break,
                Some(choice) => dispatch(app, choice).await,
                None => {
                    app.console.report(
                        Level::Error,
                        &format!(
                            "Invalid choice: {}. Please enter a number between 1 and {}",
                            input.trim(),
                            MenuChoice::ALL.len()
                        ),
                    );
                    app.pause(PRESS_ENTER).await
                }
            },
            other => other.into(),
        };

        match flow {
            Flow::Back => {}
            Flow::Cancelled => {
                app.console.report(Level::Warning, "Operation cancelled.");
                if app.pause(PRESS_ENTER).await == Flow::Closed {
                    break;
                }
            }
            Flow::Closed => {
                log::debug!("stdin closed, leaving menu");
                break;
            }
        }
    }

    println!(
        "\n{}",
        theme.paint(
            Role::Success,
            "Thank you for using Python Package Manager. Goodbye!"
        )
    );
    Ok(())
}

async fn dispatch<R: CommandRunner, P: Reporter>(app: &mut App<R, P>, choice: MenuChoice) -> Flow {
    log::debug!("menu choice: {:?}", choice);
    match choice {
        MenuChoice::ListInstalled => query::list_installed(app).await,
        MenuChoice::ListOutdated => query::list_outdated(app).await,
        MenuChoice::UpdateAll => update::update_all(app).await,
        MenuChoice::RemoveSelected => remove::remove_selected(app).await,
        MenuChoice::Exit => Flow::Closed,
    }
}

fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
