//! # ActiveScene 模块
//!
//! 当前场景的运行期上下文：台词推进器、角色实例与 cue 游标。
//! 每次载入场景时整体重建。

use crate::actor::CharacterActor;
use crate::dialogue::DialogueSequencer;
use crate::scene::{SceneCue, SceneDescriptor};

/// 当前场景上下文
#[derive(Debug, Clone)]
pub(crate) struct ActiveScene {
    pub index: usize,
    pub dialogue: DialogueSequencer,
    pub actors: Vec<CharacterActor>,
    /// 下一个待触发 cue 的下标（cue 已按时间排序）
    next_cue: usize,
}

impl ActiveScene {
    /// 根据场景描述构建上下文并开始台词
    pub fn load(index: usize, descriptor: &SceneDescriptor) -> Self {
        let mut dialogue = DialogueSequencer::new(descriptor.dialogue.clone());
        dialogue.start();

        Self {
            index,
            dialogue,
            actors: descriptor.characters.iter().map(CharacterActor::from).collect(),
            next_cue: 0,
        }
    }

    /// 取出到 `elapsed_ms` 为止新到期的 cue
    ///
    /// 每个 cue 只会返回一次。
    pub fn due_cues<'a>(
        &mut self,
        descriptor: &'a SceneDescriptor,
        elapsed_ms: f64,
    ) -> &'a [SceneCue] {
        let start = self.next_cue.min(descriptor.cues.len());
        let due = descriptor.cues[start..]
            .iter()
            .take_while(|cue| cue.at_ms <= elapsed_ms)
            .count();
        self.next_cue = start + due;
        &descriptor.cues[start..start + due]
    }
}
