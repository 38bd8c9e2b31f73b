//! # Logging 模块
//!
//! 安装 tracing-subscriber 的 fmt 输出。

use crate::config::LogConfig;
use crate::error::{HostError, HostResult};

/// 按配置初始化全局日志
///
/// 只能调用一次，重复初始化返回错误。
pub fn init(config: &LogConfig) -> HostResult<()> {
    let level = config.max_level()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(config.ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))
}
