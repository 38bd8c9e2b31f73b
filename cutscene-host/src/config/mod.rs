//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 环境变量 `CUTSCENE_CONFIG` 指定的配置文件路径（最高）
//! 2. 工作目录下的配置文件 (config.json)
//! 3. 默认值（最低）

use cutscene_runtime::DirectorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{HostError, HostResult};

/// 配置文件路径环境变量
pub const CONFIG_ENV: &str = "CUTSCENE_CONFIG";

/// 默认配置文件名
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Director 配置（种子、粒子上限等）
    #[serde(default)]
    pub director: DirectorConfig,

    /// 播放配置
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// 输入配置
    #[serde(default)]
    pub input: InputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 播放配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// 帧间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: f64,

    /// 是否按真实时间播放
    ///
    /// 关闭时使用模拟时钟，每帧固定推进 `frame_interval_ms`，不休眠。
    #[serde(default)]
    pub realtime: bool,

    /// 最大帧数（防止手动场景无人推进时无限运行）
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,

    /// 无头模式下模拟观众点击的间隔（毫秒），`None` 表示不点击
    ///
    /// 内置分镜全部由计时与台词停留推进，不需要点击。
    #[serde(default)]
    pub auto_advance_interval_ms: Option<f64>,

    /// 播放次数，播完后剩余次数大于 0 时点击重播
    #[serde(default = "default_loops")]
    pub loops: u32,

    /// 分镜文件路径（JSON），`None` 时使用内置分镜
    #[serde(default)]
    pub storyboard_path: Option<PathBuf>,
}

/// 输入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// 两次推进之间的最小间隔（毫秒），用于防抖
    #[serde(default = "default_min_advance_interval_ms")]
    pub min_advance_interval_ms: f64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别（trace / debug / info / warn / error）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否输出 ANSI 颜色
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

// 默认值函数
fn default_frame_interval_ms() -> f64 {
    16.0
}

fn default_max_frames() -> u64 {
    20_000
}

fn default_loops() -> u32 {
    1
}

fn default_min_advance_interval_ms() -> f64 {
    150.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            realtime: false,
            max_frames: default_max_frames(),
            auto_advance_interval_ms: None,
            loops: default_loops(),
            storyboard_path: None,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_advance_interval_ms: default_min_advance_interval_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_ansi(),
        }
    }
}

impl AppConfig {
    /// 配置文件路径：优先使用环境变量 `CUTSCENE_CONFIG`
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// 读取并解析配置文件
    pub fn try_load(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| HostError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> HostResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| HostError::io(path, e))?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> HostResult<()> {
        self.director.validate()?;

        let frame = self.playback.frame_interval_ms;
        if !frame.is_finite() || frame <= 0.0 {
            return Err(HostError::InvalidConfig(format!(
                "帧间隔必须为正数，实际为 {frame}"
            )));
        }

        if self.playback.max_frames == 0 {
            return Err(HostError::InvalidConfig("最大帧数必须大于 0".to_string()));
        }

        if self.playback.loops == 0 {
            return Err(HostError::InvalidConfig("播放次数必须大于 0".to_string()));
        }

        if let Some(interval) = self.playback.auto_advance_interval_ms
            && !(interval.is_finite() && interval > 0.0)
        {
            return Err(HostError::InvalidConfig(format!(
                "自动点击间隔必须为正数，实际为 {interval}"
            )));
        }

        let debounce = self.input.min_advance_interval_ms;
        if !debounce.is_finite() || debounce < 0.0 {
            return Err(HostError::InvalidConfig(format!(
                "防抖间隔必须为非负数，实际为 {debounce}"
            )));
        }

        self.log.max_level()?;

        Ok(())
    }
}

impl LogConfig {
    /// 解析日志级别
    pub fn max_level(&self) -> HostResult<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| HostError::InvalidConfig(format!("未知的日志级别: {}", self.level)))
    }
}
