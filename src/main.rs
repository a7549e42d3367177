mod config;
mod package_manager;
mod tui;

use anyhow::Result;

#[tokio::main]
async fn main() {
    env_logger::init();

    // 无论发生什么都以 0 退出，方便在 shell 脚本中调用
    if let Err(e) = run().await {
        eprintln!("An unexpected error occurred: {:#}", e);
    }
}

async fn run() -> Result<()> {
    // 配置文件损坏时退回默认配置
    let config = config::Config::load_or_default().unwrap_or_else(|e| {
        log::warn!("{:#}，使用默认配置", e);
        config::Config::default()
    });

    tui::run(config).await
}
