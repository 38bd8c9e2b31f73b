//! # History 模块
//!
//! 回看记录：按顺序保存播放过程中出现过的场景与台词。
//!
//! - 不记录镜头、粒子等临时状态
//! - 超过容量时丢弃最早的记录

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// 回看记录条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HistoryEntry {
    /// 进入场景
    SceneEntered {
        scene: usize,
        title: String,
    },

    /// 显示台词
    Dialogue {
        scene: usize,
        speaker: String,
        text: String,
        /// 台词出现时的场景时间（毫秒）
        scene_time_ms: f64,
    },
}

impl HistoryEntry {
    pub fn scene(&self) -> usize {
        match self {
            HistoryEntry::SceneEntered { scene, .. } => *scene,
            HistoryEntry::Dialogue { scene, .. } => *scene,
        }
    }
}

/// 回看记录容器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    /// 添加条目，超出容量时移除最早的条目
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// 台词条目数量
    pub fn dialogue_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, HistoryEntry::Dialogue { .. }))
            .count()
    }

    /// 最近的 N 条台词（按时间顺序）
    pub fn recent_dialogues(&self, count: usize) -> Vec<&HistoryEntry> {
        let mut recent: Vec<_> = self
            .entries
            .iter()
            .rev()
            .filter(|e| matches!(e, HistoryEntry::Dialogue { .. }))
            .take(count)
            .collect();
        recent.reverse();
        recent
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(200)
    }
}
