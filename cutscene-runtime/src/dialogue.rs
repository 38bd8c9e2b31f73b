//! # Dialogue 模块
//!
//! 单个场景内的台词推进状态机。
//!
//! ```text
//! start()   : 有台词 -> Showing(0)，否则 Idle
//! advance() : Showing(i) -> Showing(i + 1) 或 Idle；Idle 时无操作
//! ```

use serde::{Deserialize, Serialize};

/// 一句台词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// 说话者
    pub speaker: String,
    /// 台词内容
    pub text: String,
    /// 自动推进前的停留时长（毫秒）
    ///
    /// `None` 表示只能由输入推进。
    #[serde(default)]
    pub hold_ms: Option<f64>,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            hold_ms: None,
        }
    }

    /// 设置自动推进停留时长
    pub fn held_for(mut self, hold_ms: f64) -> Self {
        self.hold_ms = Some(hold_ms);
        self
    }
}

/// 台词状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogueState {
    /// 无台词，或已播完
    Idle,
    /// 正在显示第 n 句
    Showing(usize),
}

/// 台词推进器
#[derive(Debug, Clone)]
pub struct DialogueSequencer {
    lines: Vec<DialogueLine>,
    cursor: usize,
    state: DialogueState,
    started: bool,
    /// 当前台词已显示的时长（毫秒）
    line_elapsed_ms: f64,
}

impl DialogueSequencer {
    pub fn new(lines: Vec<DialogueLine>) -> Self {
        Self {
            lines,
            cursor: 0,
            state: DialogueState::Idle,
            started: false,
            line_elapsed_ms: 0.0,
        }
    }

    /// 从第一句开始
    pub fn start(&mut self) -> Option<&DialogueLine> {
        self.started = true;
        self.cursor = 0;
        self.line_elapsed_ms = 0.0;
        self.state = if self.lines.is_empty() {
            DialogueState::Idle
        } else {
            DialogueState::Showing(0)
        };
        self.current_line()
    }

    /// 推进到下一句
    ///
    /// 返回是否发生了推进。`Idle` 时调用是无操作。
    pub fn advance(&mut self) -> bool {
        let DialogueState::Showing(_) = self.state else {
            return false;
        };

        self.cursor += 1;
        self.line_elapsed_ms = 0.0;
        self.state = if self.cursor < self.lines.len() {
            DialogueState::Showing(self.cursor)
        } else {
            DialogueState::Idle
        };
        true
    }

    /// 累计当前台词的显示时长
    pub fn tick(&mut self, dt_ms: f64) {
        if matches!(self.state, DialogueState::Showing(_)) {
            self.line_elapsed_ms += dt_ms;
        }
    }

    /// 当前台词是否已达到自动推进时长
    pub fn hold_elapsed(&self) -> bool {
        match self.current_line().and_then(|line| line.hold_ms) {
            Some(hold) => self.line_elapsed_ms >= hold,
            None => false,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        match self.state {
            DialogueState::Showing(index) => self.lines.get(index),
            DialogueState::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == DialogueState::Idle
    }

    /// 是否已开始过
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// 已开始、至少有一句台词、且全部播完
    ///
    /// 用于区分"没有台词"和"台词已结束"。
    pub fn is_exhausted(&self) -> bool {
        self.started && !self.lines.is_empty() && self.is_idle()
    }

    /// 尚未显示完的台词数（包含当前句）
    pub fn lines_remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.cursor)
    }

    /// 是否还有下一句
    pub fn has_more_lines(&self) -> bool {
        match self.state {
            DialogueState::Showing(index) => index + 1 < self.lines.len(),
            DialogueState::Idle => false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_elapsed_ms(&self) -> f64 {
        self.line_elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_lines() -> DialogueSequencer {
        DialogueSequencer::new(vec![
            DialogueLine::new("16号", "我喜欢的"),
            DialogueLine::new("16号", "大自然和动物们……"),
            DialogueLine::new("16号", "替我守护它们"),
            DialogueLine::new("16号", "拜托了"),
        ])
    }

    #[test]
    fn test_start_shows_first_line() {
        let mut seq = four_lines();
        assert!(!seq.has_started());
        let first = seq.start().map(|line| line.text.clone());
        assert_eq!(first.as_deref(), Some("我喜欢的"));
        assert_eq!(seq.state(), DialogueState::Showing(0));
        assert_eq!(seq.lines_remaining(), 4);
        assert!(seq.has_more_lines());
    }

    #[test]
    fn test_four_advances_reach_idle() {
        let mut seq = four_lines();
        seq.start();
        for expected_cursor in 1..=4 {
            assert!(!seq.is_idle());
            assert!(seq.advance());
            assert_eq!(seq.cursor(), expected_cursor);
        }
        assert!(seq.is_idle());
        assert!(seq.is_exhausted());
        assert_eq!(seq.lines_remaining(), 0);

        // Idle 时推进是无操作
        assert!(!seq.advance());
        assert_eq!(seq.cursor(), 4);
    }

    #[test]
    fn test_empty_dialogue() {
        let mut seq = DialogueSequencer::new(Vec::new());
        assert!(seq.start().is_none());
        assert!(seq.is_idle());
        assert!(seq.has_started());
        // 没有台词不算"播完"
        assert!(!seq.is_exhausted());
        assert!(!seq.advance());
    }

    #[test]
    fn test_hold_timer() {
        let mut seq = DialogueSequencer::new(vec![
            DialogueLine::new("A", "one").held_for(100.0),
            DialogueLine::new("A", "two"),
        ]);
        seq.start();
        seq.tick(60.0);
        assert!(!seq.hold_elapsed());
        seq.tick(40.0);
        assert!(seq.hold_elapsed());

        seq.advance();
        assert_eq!(seq.line_elapsed_ms(), 0.0);
        seq.tick(10_000.0);
        assert!(!seq.hold_elapsed());
    }

    #[test]
    fn test_restart_resets_cursor() {
        let mut seq = four_lines();
        seq.start();
        seq.advance();
        seq.advance();
        seq.start();
        assert_eq!(seq.cursor(), 0);
        assert_eq!(seq.state(), DialogueState::Showing(0));
    }
}
