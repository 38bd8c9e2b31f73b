//! # State 模块
//!
//! Director 的播放状态与阶段。
//!
//! ## 设计原则
//!
//! - 播放状态只有一份，由 Director 独占
//! - 只能通过 `update()` / `advance()` / `restart()` 等入口修改
//! - 所有状态可序列化，便于调试输出与快照测试

use serde::{Deserialize, Serialize};

/// 播放阶段
///
/// ```text
/// Loading -> Playing { scene: 0 } -> ... -> Playing { scene: N-1 } -> Finished
///                ^                                                      |
///                +---------------------- restart() ---------------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorPhase {
    /// 尚未开始播放
    Loading,
    /// 正在播放第 `scene` 个场景
    Playing { scene: usize, sub: ScenePhase },
    /// 全部场景播完，等待 `restart()`
    Finished,
}

impl DirectorPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }

    pub fn scene(&self) -> Option<usize> {
        match self {
            Self::Playing { scene, .. } => Some(*scene),
            _ => None,
        }
    }
}

/// 场景内的子阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenePhase {
    /// 正在显示台词
    DialogueActive,
    /// 台词结束，等待推进策略
    AwaitingAdvance,
}

/// 播放状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// 当前场景序号；等于场景总数时表示已播完
    pub active_scene_index: usize,
    /// 当前场景已经过的时间（毫秒）
    pub scene_elapsed_ms: f64,
    /// 当前场景的台词游标
    pub dialogue_cursor: usize,
    pub is_dialogue_showing: bool,
    pub is_playing: bool,
    pub is_paused: bool,
    /// 当前场景内执行过的 `update()` 次数
    pub tick_count: u64,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            active_scene_index: 0,
            scene_elapsed_ms: 0.0,
            dialogue_cursor: 0,
            is_dialogue_showing: false,
            is_playing: false,
            is_paused: false,
            tick_count: 0,
        }
    }

    /// 进入新场景时重置场景计时
    pub fn enter_scene(&mut self, index: usize) {
        self.active_scene_index = index;
        self.scene_elapsed_ms = 0.0;
        self.dialogue_cursor = 0;
        self.tick_count = 0;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
