//! pip 输出解析函数

use super::types::{PackageRecord, PipError};

/// 失败信息在汇总中最多显示的字符数
pub const DETAIL_MAX_CHARS: usize = 50;

/// 清理输出中的 ANSI 转义序列和控制字符，并把多行压成一行
pub fn clean_terminal_output(input: &str) -> String {
    let mut result = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\n' | '\r' | '\t' => result.push(' '),
            c if c.is_control() => {}
            _ => result.push(c),
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 解析 `pip list --format=json` 输出，保持 pip 给出的顺序
pub fn parse_package_list(output: &str) -> Result<Vec<PackageRecord>, PipError> {
    Ok(serde_json::from_str(output.trim())?)
}

/// 找到第一行包含 marker 的输出（如 "Successfully installed"）
pub fn find_marker_line(output: &str, marker: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains(marker))
        .map(|line| line.trim().to_string())
}

/// `pip --version` 的第一行非空输出
pub fn parse_version_line(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// 失败时用于汇总的简短说明：优先 stderr，为空时退回 stdout
pub fn failure_detail(stderr: &str, stdout: &str) -> String {
    let source = if stderr.trim().is_empty() { stdout } else { stderr };
    truncate_chars(&clean_terminal_output(source), DETAIL_MAX_CHARS)
}

/// 按字符数截断，超出部分以 "..." 结尾
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_in_order() {
        let json = r#"[
            {"name": "zope", "version": "5.0"},
            {"name": "attrs", "version": "23.1.0"},
            {"name": "Django", "version": "4.2"}
        ]"#;
        let records = parse_package_list(json).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["zope", "attrs", "Django"]);
    }

    #[test]
    fn parses_outdated_fields() {
        let json = r#"[{"name":"requests","version":"2.28.0","latest_version":"2.32.3","latest_filetype":"wheel"}]"#;
        let records = parse_package_list(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latest_version.as_deref(), Some("2.32.3"));
    }

    #[test]
    fn empty_array_is_ok() {
        assert!(parse_package_list("[]\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_package_list("WARNING: not json"),
            Err(PipError::Parse(_))
        ));
        // 缺少 version 字段同样视为解析失败
        assert!(parse_package_list(r#"[{"name":"x"}]"#).is_err());
    }

    #[test]
    fn finds_first_marker_line() {
        let out = "Collecting six\n  Downloading six.whl\nSuccessfully installed six-1.16.0\n";
        assert_eq!(
            find_marker_line(out, "Successfully installed").as_deref(),
            Some("Successfully installed six-1.16.0")
        );
        assert_eq!(find_marker_line(out, "Successfully uninstalled"), None);
    }

    #[test]
    fn version_line_skips_blank() {
        assert_eq!(
            parse_version_line("\n  pip 24.0 from /usr/lib (python 3.12)\n"),
            "pip 24.0 from /usr/lib (python 3.12)"
        );
        assert_eq!(parse_version_line(""), "");
    }

    #[test]
    fn strips_ansi_and_newlines() {
        let raw = "\x1b[31mERROR:\x1b[0m could not\r\nfind   package";
        assert_eq!(clean_terminal_output(raw), "ERROR: could not find package");
    }

    #[test]
    fn truncates_long_detail() {
        let long = "x".repeat(80);
        let detail = failure_detail(&long, "");
        assert_eq!(detail.chars().count(), DETAIL_MAX_CHARS + 3);
        assert!(detail.ends_with("..."));
        assert_eq!(failure_detail("  ", "short"), "short");
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("包管理器错误", 3), "包管理...");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }
}
