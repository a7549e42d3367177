use super::console::Console;
use super::input::{Answer, Prompter};
use super::theme::Theme;
use crate::package_manager::{CommandRunner, PackageManager, Reporter, SystemRunner};
use std::time::Duration;

pub const PRESS_ENTER: &str = "Press Enter to continue...";

// ========== 枚举 ==========

/// 主菜单选项，顺序即编号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListInstalled,
    ListOutdated,
    UpdateAll,
    RemoveSelected,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::ListInstalled,
        MenuChoice::ListOutdated,
        MenuChoice::UpdateAll,
        MenuChoice::RemoveSelected,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ListInstalled => "List all installed packages",
            MenuChoice::ListOutdated => "Check for outdated packages",
            MenuChoice::UpdateAll => "Update all outdated packages",
            MenuChoice::RemoveSelected => "Remove specific packages",
            MenuChoice::Exit => "Exit",
        }
    }

    /// "1".."5" → 对应选项
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .zip(1..)
            .find(|(_, n)| input.trim() == n.to_string())
            .map(|(choice, _)| *choice)
    }
}

/// 一个菜单操作结束后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// 正常返回主菜单
    Back,
    /// 用户按了 Ctrl+C
    Cancelled,
    /// stdin 已关闭
    Closed,
}

impl From<Answer> for Flow {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Line(_) => Flow::Back,
            Answer::Interrupted => Flow::Cancelled,
            Answer::Closed => Flow::Closed,
        }
    }
}

// ========== App ==========

pub struct App<R = SystemRunner, P = Console> {
    pub pm: PackageManager<R>,
    pub console: P,
    pub prompter: Prompter,
    pub theme: Theme,
    pub upgrade_delay: Duration,
}

impl App {
    /// 真实终端：读取 stdin，输出到 Console
    pub fn new(pm: PackageManager, theme: Theme, upgrade_delay: Duration) -> Self {
        Self::assemble(
            pm,
            Console::new(theme),
            Prompter::spawn(theme),
            theme,
            upgrade_delay,
        )
    }
}

impl<R: CommandRunner, P: Reporter> App<R, P> {
    pub fn assemble(
        pm: PackageManager<R>,
        console: P,
        prompter: Prompter,
        theme: Theme,
        upgrade_delay: Duration,
    ) -> Self {
        Self {
            pm,
            console,
            prompter,
            theme,
            upgrade_delay,
        }
    }

    /// 等待回车确认
    pub async fn pause(&mut self, message: &str) -> Flow {
        self.prompter.ask(&format!("\n{}", message)).await.into()
    }
}
