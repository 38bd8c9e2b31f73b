//! # Render 模块
//!
//! 每帧交给渲染层的只读快照。
//!
//! 快照借用 Director 内部数据，不做拷贝；渲染层在同一帧内消费完毕。

use serde::Serialize;

use crate::actor::CharacterActor;
use crate::camera::CameraState;
use crate::dialogue::DialogueLine;
use crate::particle::Particle;
use crate::scene::Backdrop;
use crate::state::DirectorPhase;

/// 当前显示的台词
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DialogueView<'a> {
    pub speaker: &'a str,
    pub text: &'a str,
    /// 台词序号（从 0 开始）
    pub index: usize,
    /// 本场景台词总数
    pub total: usize,
}

impl<'a> DialogueView<'a> {
    pub(crate) fn new(line: &'a DialogueLine, index: usize, total: usize) -> Self {
        Self {
            speaker: &line.speaker,
            text: &line.text,
            index,
            total,
        }
    }
}

/// 渲染快照
#[derive(Debug, Clone, Serialize)]
pub struct RenderState<'a> {
    pub phase: DirectorPhase,
    pub camera: CameraState,
    pub active_scene_index: usize,
    /// 场景标题，播完后为 `None`
    pub scene_title: Option<&'a str>,
    pub backdrop: Option<&'a Backdrop>,
    /// 场景进度（0.0 - 1.0），用于进度条
    pub progress: f64,
    pub characters: &'a [CharacterActor],
    pub particles: &'a [Particle],
    pub dialogue: Option<DialogueView<'a>>,
    pub is_paused: bool,
}

/// 渲染层接口
///
/// 每帧调用一次，实现方只读取快照，不修改 Director。
pub trait Renderer {
    fn render(&mut self, frame: &RenderState<'_>);
}
