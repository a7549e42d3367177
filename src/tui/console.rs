//! 带时间戳的彩色消息输出

use super::spinner::Spinner;
use super::theme::{Role, Theme};
use crate::package_manager::{Level, Reporter};
use chrono::Local;
use std::future::Future;

#[derive(Debug, Clone, Copy)]
pub struct Console {
    theme: Theme,
}

impl Console {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Reporter for Console {
    fn report(&self, level: Level, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        println!("{}", format_line(self.theme, level, &timestamp, message));
    }

    async fn with_progress<F: Future>(&self, message: &str, task: F) -> F::Output {
        let spinner = Spinner::start(message, self.theme);
        let output = task.await;
        spinner.stop().await;
        output
    }
}

/// `[HH:MM:SS] <图标> 消息`
pub fn format_line(theme: Theme, level: Level, timestamp: &str, message: &str) -> String {
    let (icon, role) = match level {
        Level::Info => ("ℹ", Role::Info),
        Level::Success => ("✓", Role::Success),
        Level::Warning => ("⚠", Role::Warning),
        Level::Error => ("✗", Role::Error),
        Level::Processing => ("⟳", Role::Processing),
    };
    theme.paint(role, &format!("[{}] {} {}", timestamp, icon, message))
}
