//! # Actor 模块
//!
//! 场景中的角色实例。
//!
//! Director 只负责按场景生成角色、推进 `age_ms` 并把每帧的 dt 交给
//! [`CharacterHook`]；表情、气焰、泪水等视觉状态由宿主的角色子系统解释。

use serde::{Deserialize, Serialize};

/// 角色生成参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpawn {
    /// 角色标识（如 `"gohan"`）
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// 交给渲染层的状态标签（如 `"defeated"`、`"silent_rage"`）
    #[serde(default)]
    pub state_tag: String,
}

fn default_scale() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    1.0
}

impl CharacterSpawn {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            scale: default_scale(),
            opacity: default_opacity(),
            state_tag: String::new(),
        }
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn tagged(mut self, state_tag: impl Into<String>) -> Self {
        self.state_tag = state_tag.into();
        self
    }
}

/// 场景中的角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterActor {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
    pub state_tag: String,
    /// 生成时的位置，钩子据此做相对位移
    pub home_x: f64,
    pub home_y: f64,
    /// 自场景载入以来的时长（毫秒）
    pub age_ms: f64,
}

impl From<&CharacterSpawn> for CharacterActor {
    fn from(spawn: &CharacterSpawn) -> Self {
        Self {
            id: spawn.id.clone(),
            x: spawn.x,
            y: spawn.y,
            scale: spawn.scale,
            opacity: spawn.opacity.clamp(0.0, 1.0),
            state_tag: spawn.state_tag.clone(),
            home_x: spawn.x,
            home_y: spawn.y,
            age_ms: 0.0,
        }
    }
}

/// 角色逐帧更新钩子
pub trait CharacterHook {
    fn update(&mut self, scene_index: usize, actor: &mut CharacterActor, dt_ms: f64);
}

/// 不做任何事的默认钩子
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl CharacterHook for NoopHook {
    fn update(&mut self, _scene_index: usize, _actor: &mut CharacterActor, _dt_ms: f64) {}
}

impl<F> CharacterHook for F
where
    F: FnMut(usize, &mut CharacterActor, f64),
{
    fn update(&mut self, scene_index: usize, actor: &mut CharacterActor, dt_ms: f64) {
        self(scene_index, actor, dt_ms)
    }
}
