use super::layout::{center, rule};
use super::state::MenuChoice;
use super::theme::{Role, Theme};
use std::fmt::Write;

const HEADER_ART: &str = r#"
╭──────────────────────────────────────────────╮
│                                              │
│           Python Package Manager             │
│                                              │
│    List, Update, and Remove pip packages     │
│                                              │
╰──────────────────────────────────────────────╯"#;

/// 居中的标题框
pub fn render_header(width: usize, theme: Theme) -> String {
    let mut out = String::from("\n");
    for line in HEADER_ART.lines() {
        let _ = writeln!(out, "{}", theme.paint(Role::Header, &center(line, width)));
    }
    out
}

/// 主菜单
pub fn render_menu(width: usize, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", theme.paint(Role::Bold, "MAIN MENU"));
    let _ = writeln!(out, "{}", rule(width));
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {}",
            theme.paint(Role::Info, &format!("{}.", i + 1)),
            choice.label()
        );
    }
    let _ = writeln!(out, "{}", rule(width));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_lists_every_choice_in_order() {
        let menu = render_menu(30, Theme::plain());
        assert!(menu.contains("1. List all installed packages"));
        assert!(menu.contains("5. Exit"));
        let first = menu.find("1.").unwrap();
        let last = menu.find("5.").unwrap();
        assert!(first < last);
    }

    #[test]
    fn header_is_centered() {
        let header = render_header(100, Theme::plain());
        let title = header.lines().find(|l| l.contains("Python Package Manager")).unwrap();
        // 框宽 48，(100 - 48) / 2 = 26
        assert!(title.starts_with(&" ".repeat(26)));
        assert!(!title.starts_with(&" ".repeat(27)));
    }
}
