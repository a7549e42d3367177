use super::theme::{Role, Theme};
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

/// 一次提示的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Line(String),
    /// Ctrl+C
    Interrupted,
    /// stdin 已到 EOF
    Closed,
}

/// 行输入。stdin 由独立线程读取后经 channel 转发，
/// 这样等待输入时可以同时响应 Ctrl+C。channel 关闭即 EOF
pub struct Prompter {
    input: mpsc::UnboundedReceiver<Answer>,
    theme: Theme,
}

impl Prompter {
    pub fn spawn(theme: Theme) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(Answer::Line(line)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("读取 stdin 失败: {}", e);
                        break;
                    }
                }
            }
        });
        Self::from_channel(rx, theme)
    }

    /// 从任意来源读取回答（测试时预置输入）
    pub fn from_channel(input: mpsc::UnboundedReceiver<Answer>, theme: Theme) -> Self {
        Self { input, theme }
    }

    pub async fn ask(&mut self, prompt: &str) -> Answer {
        print!("{}", self.theme.paint(Role::Info, prompt));
        let _ = io::stdout().flush();

        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // 无法注册信号处理时只等待输入
                log::warn!("无法监听 Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        let answer = tokio::select! {
            answer = self.input.recv() => answer.unwrap_or(Answer::Closed),
            _ = interrupt => Answer::Interrupted,
        };
        if answer == Answer::Interrupted {
            println!();
        }
        answer
    }
}

/// 解析 "2,7,x,4" 形式的序号输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// 合法序号（从 1 开始），按输入顺序去重
    pub indices: Vec<usize>,
    pub out_of_range: Vec<i64>,
    pub non_numeric: Vec<String>,
}

pub fn parse_selection(input: &str, len: usize) -> Selection {
    let mut selection = Selection::default();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<i64>() {
            Ok(n) if n >= 1 && (n as u64) <= len as u64 => {
                let idx = n as usize;
                if !selection.indices.contains(&idx) {
                    selection.indices.push(idx);
                }
            }
            Ok(n) => selection.out_of_range.push(n),
            Err(_) => selection.non_numeric.push(entry.to_string()),
        }
    }
    selection
}


#[cfg(test)]
mod tests {
    use super::*;
    use testing::{line, scripted};

    #[tokio::test]
    async fn answers_in_order_then_closed() {
        let mut prompter = scripted(vec![line("1"), Answer::Interrupted, line("q")]);
        assert_eq!(prompter.ask("> ").await, line("1"));
        assert_eq!(prompter.ask("> ").await, Answer::Interrupted);
        assert_eq!(prompter.ask("> ").await, line("q"));
        assert_eq!(prompter.ask("> ").await, Answer::Closed);
        assert_eq!(prompter.ask("> ").await, Answer::Closed);
    }

    #[test]
    fn keeps_valid_and_reports_rest() {
        let selection = parse_selection("2,7,x,4", 5);
        assert_eq!(selection.indices, [2, 4]);
        assert_eq!(selection.out_of_range, [7]);
        assert_eq!(selection.non_numeric, ["x"]);
    }

    #[test]
    fn bounds_are_one_based() {
        let selection = parse_selection("0, 1, 3, -2", 3);
        assert_eq!(selection.indices, [1, 3]);
        assert_eq!(selection.out_of_range, [0, -2]);
    }

    #[test]
    fn skips_blank_entries_and_duplicates() {
        let selection = parse_selection(" 3,, 1 ,3,", 4);
        assert_eq!(selection.indices, [3, 1]);
        assert!(selection.out_of_range.is_empty());
        assert!(selection.non_numeric.is_empty());
    }

    #[test]
    fn nothing_valid() {
        let selection = parse_selection("abc", 2);
        assert!(selection.indices.is_empty());
        assert_eq!(parse_selection("", 2), Selection::default());
    }
}
