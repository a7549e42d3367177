//! 单行加载动画

use super::theme::{Role, Theme};
use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const INTERVAL: Duration = Duration::from_millis(100);

/// 后台任务每 100ms 重绘当前行；stop() 之前前台不应写终端
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: &str, theme: Theme) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let message = message.to_string();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(INTERVAL);
            let mut frame = 0;
            loop {
                ticker.tick().await;
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                let line = theme.paint(Role::Processing, &format!("{} {}", FRAMES[frame], message));
                // 写失败不影响实际操作
                let mut out = io::stdout();
                let _ = write!(out, "\r{}", line);
                let _ = out.flush();
                frame = (frame + 1) % FRAMES.len();
            }
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    pub async fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        let mut stdout = io::stdout();
        let _ = execute!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // 未调用 stop() 时（例如 future 被取消）也要让后台任务退出
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_joins_background_task() {
        let spinner = Spinner::start("testing", Theme::plain());
        tokio::time::sleep(Duration::from_millis(250)).await;
        let flag = Arc::clone(&spinner.running);
        tokio::time::timeout(Duration::from_secs(2), spinner.stop())
            .await
            .expect("spinner did not stop");
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn drop_clears_run_flag() {
        let spinner = Spinner::start("dropped", Theme::plain());
        let flag = Arc::clone(&spinner.running);
        drop(spinner);
        assert!(!flag.load(Ordering::SeqCst));
    }
}
