//! # Input 模块
//!
//! 输入处理系统，负责把宿主的原始事件转换为 DirectorInput。
//!
//! ## 设计说明
//!
//! - `InputManager` 接收键盘、鼠标和触摸事件
//! - 根据 Director 是否已播完决定点击的含义（推进 / 重播）
//! - 实现输入防抖，避免重复事件跳过台词

use cutscene_runtime::DirectorInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 键盘按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    R,
    /// 未映射的按键
    Other,
}

/// 宿主原始输入事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    KeyDown(KeyCode),
    /// 鼠标按下
    PointerDown,
    /// 触摸轻触
    Tap,
}

impl HostEvent {
    /// 是否是主要交互（点击 / 轻触 / 空格 / 回车）
    fn is_primary(&self) -> bool {
        matches!(
            self,
            HostEvent::PointerDown
                | HostEvent::Tap
                | HostEvent::KeyDown(KeyCode::Space | KeyCode::Enter)
        )
    }
}

/// 输入管理器
///
/// 负责把原始事件转换为 DirectorInput。
#[derive(Debug, Clone)]
pub struct InputManager {
    /// 两次推进之间的最小间隔（毫秒）
    min_advance_interval_ms: f64,
    /// 上次推进时间（用于防抖）
    last_advance_ms: Option<f64>,
}

impl InputManager {
    /// 创建新的输入管理器
    pub fn new(min_advance_interval_ms: f64) -> Self {
        Self {
            min_advance_interval_ms: min_advance_interval_ms.max(0.0),
            last_advance_ms: None,
        }
    }

    /// 转换一个原始事件
    ///
    /// - `now_ms`：事件发生时间（宿主时钟）
    /// - `finished`：Director 是否已播完，播完后的点击表示重播
    ///
    /// 防抖窗口内的推进被丢弃，返回 `None`。
    pub fn translate(
        &mut self,
        event: HostEvent,
        now_ms: f64,
        finished: bool,
    ) -> Option<DirectorInput> {
        match event {
            HostEvent::KeyDown(KeyCode::Escape) => Some(DirectorInput::TogglePause),
            HostEvent::KeyDown(KeyCode::R) => {
                self.last_advance_ms = None;
                Some(DirectorInput::Restart)
            }
            event if event.is_primary() => {
                if finished {
                    self.last_advance_ms = None;
                    return Some(DirectorInput::Restart);
                }
                if self.is_debounced(now_ms) {
                    debug!(now_ms, "防抖：忽略推进");
                    return None;
                }
                self.last_advance_ms = Some(now_ms);
                Some(DirectorInput::Advance)
            }
            _ => None,
        }
    }

    fn is_debounced(&self, now_ms: f64) -> bool {
        self.last_advance_ms
            .is_some_and(|last| now_ms - last < self.min_advance_interval_ms)
    }

    /// 清除防抖记录
    pub fn reset(&mut self) {
        self.last_advance_ms = None;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(150.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_inputs_advance() {
        for event in [
            HostEvent::PointerDown,
            HostEvent::Tap,
            HostEvent::KeyDown(KeyCode::Space),
            HostEvent::KeyDown(KeyCode::Enter),
        ] {
            let mut input = InputManager::new(150.0);
            assert_eq!(
                input.translate(event, 0.0, false),
                Some(DirectorInput::Advance)
            );
        }
    }

    #[test]
    fn test_debounce_drops_fast_advance() {
        let mut input = InputManager::new(150.0);
        assert_eq!(
            input.translate(HostEvent::Tap, 1000.0, false),
            Some(DirectorInput::Advance)
        );
        assert_eq!(input.translate(HostEvent::PointerDown, 1100.0, false), None);
        // 被丢弃的事件不刷新防抖计时
        assert_eq!(
            input.translate(HostEvent::Tap, 1150.0, false),
            Some(DirectorInput::Advance)
        );
    }

    #[test]
    fn test_escape_and_restart_not_debounced() {
        let mut input = InputManager::new(150.0);
        input.translate(HostEvent::Tap, 0.0, false);
        assert_eq!(
            input.translate(HostEvent::KeyDown(KeyCode::Escape), 10.0, false),
            Some(DirectorInput::TogglePause)
        );
        assert_eq!(
            input.translate(HostEvent::KeyDown(KeyCode::R), 20.0, false),
            Some(DirectorInput::Restart)
        );
        // 重播后立即可以推进
        assert_eq!(
            input.translate(HostEvent::Tap, 30.0, false),
            Some(DirectorInput::Advance)
        );
    }

    #[test]
    fn test_tap_after_finish_restarts() {
        let mut input = InputManager::new(150.0);
        assert_eq!(
            input.translate(HostEvent::Tap, 0.0, true),
            Some(DirectorInput::Restart)
        );
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut input = InputManager::default();
        assert_eq!(
            input.translate(HostEvent::KeyDown(KeyCode::Other), 0.0, false),
            None
        );
    }
}
