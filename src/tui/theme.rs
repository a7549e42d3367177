//! 终端配色，启动时确定一次，之后只读

use crossterm::style::{Color, Stylize};
use std::io::IsTerminal;

/// 标题（亮蓝）
pub const HEADER: Color = Color::Blue;
/// 成功
pub const SUCCESS: Color = Color::DarkGreen;
/// 警告 / 进行中
pub const WARNING: Color = Color::DarkYellow;
/// 错误
pub const ERROR: Color = Color::DarkRed;
/// 普通信息与提示
pub const INFO: Color = Color::DarkBlue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Header,
    Success,
    Warning,
    Error,
    Info,
    Processing,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    /// 配置优先，否则仅在 stdout 是终端时启用颜色
    pub fn detect(color: Option<bool>) -> Self {
        if color.unwrap_or_else(|| std::io::stdout().is_terminal()) {
            Self { enabled: true }
        } else {
            Self::plain()
        }
    }

    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, role: Role, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = match role {
            Role::Header => text.with(HEADER).bold(),
            Role::Success => text.with(SUCCESS),
            Role::Warning | Role::Processing => text.with(WARNING),
            Role::Error => text.with(ERROR),
            Role::Info => text.with(INFO),
            Role::Bold => text.bold(),
        };
        styled.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_has_no_escapes() {
        assert_eq!(Theme::plain().paint(Role::Error, "boom"), "boom");
    }

    #[test]
    fn colored_theme_wraps_text() {
        let painted = Theme::detect(Some(true)).paint(Role::Success, "ok");
        assert!(painted.contains("ok"));
        assert!(painted.contains('\x1b'));
    }
}
