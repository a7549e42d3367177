use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 普通命令（list / uninstall）的超时
    pub command_timeout_secs: u64,
    /// install --upgrade 的超时，安装可能很慢
    pub upgrade_timeout_secs: u64,
    /// 探测 pip 时 `--version` 的超时
    pub version_check_timeout_secs: u64,
    /// 连续升级之间的间隔，避免 pip 缓存 / 锁竞争
    pub upgrade_delay_ms: u64,
    /// 候选调用方式，按优先级排列，如 "python3 -m pip"
    pub candidates: Vec<String>,
    /// 未设置时根据终端自动判断
    pub color: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout_secs: 120,
            upgrade_timeout_secs: 300,
            version_check_timeout_secs: 15,
            upgrade_delay_ms: 1000,
            candidates: ["pip", "pip3", "python3 -m pip", "python -m pip"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            color: None,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let config_path = PathBuf::from(home).join(".config/lian-pip/config.toml");

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn upgrade_timeout(&self) -> Duration {
        Duration::from_secs(self.upgrade_timeout_secs)
    }

    pub fn version_check_timeout(&self) -> Duration {
        Duration::from_secs(self.version_check_timeout_secs)
    }

    pub fn upgrade_delay(&self) -> Duration {
        Duration::from_millis(self.upgrade_delay_ms)
    }
}
