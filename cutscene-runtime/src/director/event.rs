//! # Event 模块
//!
//! Director 向宿主报告的播放事件。
//!
//! 事件在 `update()` / `advance()` / `restart()` 过程中产生，
//! 宿主每帧通过 `drain_events()` 取走（音效、UI 提示等由宿主处理）。

use serde::{Deserialize, Serialize};

/// 播放事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DirectorEvent {
    /// 进入场景
    SceneEntered { scene: usize, title: String },
    /// 显示一句台词
    DialogueShown {
        scene: usize,
        index: usize,
        speaker: String,
        text: String,
    },
    /// 当前场景台词播完
    DialogueExhausted { scene: usize },
    /// 场景定时动作触发
    CueFired { scene: usize, name: String },
    Paused,
    Resumed,
    /// 重新开始播放
    Restarted,
    /// 全部场景播完
    Finished,
}

impl DirectorEvent {
    /// 事件的简短描述，用于日志与测试轨迹
    pub fn summary(&self) -> String {
        match self {
            DirectorEvent::SceneEntered { scene, title } => format!("scene {scene} {title}"),
            DirectorEvent::DialogueShown {
                scene,
                index,
                speaker,
                text,
            } => format!("line {scene}.{index} {speaker}: {text}"),
            DirectorEvent::DialogueExhausted { scene } => format!("exhausted {scene}"),
            DirectorEvent::CueFired { scene, name } => format!("cue {scene} {name}"),
            DirectorEvent::Paused => "paused".to_string(),
            DirectorEvent::Resumed => "resumed".to_string(),
            DirectorEvent::Restarted => "restarted".to_string(),
            DirectorEvent::Finished => "finished".to_string(),
        }
    }
}
