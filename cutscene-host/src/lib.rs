//! # Host 层
//!
//! 过场动画的无头宿主实现，不依赖窗口与图形设备。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与日志初始化
//! - 分镜来源（内置或 JSON 文件）
//! - 输入采集与防抖
//! - 驱动帧循环，把 RenderState 交给渲染器
//! - 处理 Director 事件（宿主信号、播完重播）
//!
//! Host 层不包含播放逻辑，只负责驱动 Director 并消费它的输出。

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod storyboard;

pub use app::{App, RunSummary};
pub use config::{AppConfig, InputConfig, LogConfig, PlaybackConfig};
pub use error::{HostError, HostResult};
pub use input::{HostEvent, InputManager, KeyCode};
pub use renderer::{FrameStats, TraceRenderer};
