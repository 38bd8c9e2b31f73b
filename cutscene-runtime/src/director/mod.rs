//! # Director 模块
//!
//! 过场动画的调度核心：场景载入、逐帧推进、输入处理与事件输出。

mod active_scene;
mod engine;
mod event;

pub use engine::Director;
pub use event::DirectorEvent;
