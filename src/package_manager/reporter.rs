//! 面向用户的进度与消息输出接口，由 tui 层实现

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
    Processing,
}

#[allow(async_fn_in_trait)]
pub trait Reporter {
    /// 输出一条带级别的消息
    fn report(&self, level: Level, message: &str);

    /// 在 task 运行期间显示进度动画，task 结束后清除
    async fn with_progress<F: Future>(&self, message: &str, task: F) -> F::Output;
}
