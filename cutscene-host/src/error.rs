//! # Error 模块
//!
//! 宿主层错误类型。

use std::path::PathBuf;

use cutscene_runtime::{ConfigError as DirectorConfigError, StoryboardError};
use thiserror::Error;

/// 宿主层错误
#[derive(Error, Debug)]
pub enum HostError {
    /// 文件读写失败
    #[error("文件 IO 错误 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析或序列化失败
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置验证失败
    #[error("配置验证失败: {0}")]
    InvalidConfig(String),

    /// Director 配置无效
    #[error(transparent)]
    DirectorConfig(#[from] DirectorConfigError),

    /// 分镜无效
    #[error(transparent)]
    Storyboard(#[from] StoryboardError),

    /// 日志系统初始化失败
    #[error("日志初始化失败: {0}")]
    Logging(String),
}

impl HostError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;
