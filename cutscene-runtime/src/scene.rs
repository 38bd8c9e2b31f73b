//! # Scene 模块
//!
//! 场景描述与分镜。
//!
//! ## 设计原则
//!
//! - 场景描述是**静态数据**：启动时构造一次，播放期间不修改
//! - 背景、角色等差异通过数据（[`Backdrop`]、[`CharacterSpawn`]）表达，
//!   渲染层按数据绘制，不依赖场景序号
//! - 所有校验在 [`Storyboard::new`] 中一次完成，播放期间不会出错

use serde::{Deserialize, Serialize};

use crate::actor::CharacterSpawn;
use crate::camera::{CameraPose, ShakeSpec};
use crate::dialogue::DialogueLine;
use crate::easing::Easing;
use crate::error::StoryboardError;
use crate::particle::ParticleKind;

/// 场景推进策略
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AdvancePolicy {
    /// 只由输入推进
    Manual,
    /// 台词播完且计时到达后自动推进
    AutoTimed { duration_ms: f64 },
    /// 台词播完后自动推进
    DialogueGated,
}

/// 背景描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Backdrop {
    /// 纯色
    Solid { color: String },
    /// 上下渐变
    VerticalGradient { top: String, bottom: String },
    /// 由渲染层按 key 绘制的背景（如 `"destroyed_stadium"`）
    Painted { key: String },
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::Solid {
            color: "#000000".to_string(),
        }
    }
}

/// 场景镜头
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    /// 起始机位，`None` 表示从当前机位出发
    #[serde(default)]
    pub from: Option<CameraPose>,
    /// 目标机位
    pub to: CameraPose,
    /// 进入场景时的抖动
    #[serde(default)]
    pub shake: Option<ShakeSpec>,
    #[serde(default)]
    pub easing: Easing,
}

impl CameraTarget {
    /// 从当前机位移动到目标
    pub fn to(pose: CameraPose) -> Self {
        Self {
            from: None,
            to: pose,
            shake: None,
            easing: Easing::Linear,
        }
    }

    /// 从指定机位移动到目标
    pub fn between(from: CameraPose, to: CameraPose) -> Self {
        Self {
            from: Some(from),
            ..Self::to(to)
        }
    }

    pub fn with_shake(mut self, shake: ShakeSpec) -> Self {
        self.shake = Some(shake);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// 粒子发射区域（中心 + 半宽高）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionRegion {
    pub x: f64,
    pub y: f64,
    pub half_width: f64,
    pub half_height: f64,
}

impl EmissionRegion {
    pub const fn point(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            half_width: 0.0,
            half_height: 0.0,
        }
    }

    pub const fn rect(x: f64, y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            x,
            y,
            half_width,
            half_height,
        }
    }
}

/// 场景粒子发射规则
///
/// 每帧以概率 `rate` 在区域内随机位置生成一个 `kind` 粒子。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionPolicy {
    pub kind: ParticleKind,
    pub rate: f64,
    pub region: EmissionRegion,
}

impl EmissionPolicy {
    pub const fn new(kind: ParticleKind, rate: f64, region: EmissionRegion) -> Self {
        Self { kind, rate, region }
    }
}

/// 定时触发的场景动作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CueAction {
    /// 镜头抖动
    Shake(ShakeSpec),
    /// 通知宿主（音效等由宿主处理）
    Signal { name: String },
}

/// 场景内的定时动作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCue {
    /// 相对场景开始的时间（毫秒）
    pub at_ms: f64,
    pub action: CueAction,
}

impl SceneCue {
    pub fn shake(at_ms: f64, shake: ShakeSpec) -> Self {
        Self {
            at_ms,
            action: CueAction::Shake(shake),
        }
    }

    pub fn signal(at_ms: f64, name: impl Into<String>) -> Self {
        Self {
            at_ms,
            action: CueAction::Signal { name: name.into() },
        }
    }
}

/// 场景描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub title: String,
    #[serde(default)]
    pub backdrop: Backdrop,
    pub camera: CameraTarget,
    pub advance: AdvancePolicy,
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default)]
    pub characters: Vec<CharacterSpawn>,
    #[serde(default)]
    pub emitters: Vec<EmissionPolicy>,
    #[serde(default)]
    pub cues: Vec<SceneCue>,
}

impl SceneDescriptor {
    pub fn new(title: impl Into<String>, camera: CameraTarget, advance: AdvancePolicy) -> Self {
        Self {
            title: title.into(),
            backdrop: Backdrop::default(),
            camera,
            advance,
            dialogue: Vec::new(),
            characters: Vec::new(),
            emitters: Vec::new(),
            cues: Vec::new(),
        }
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn with_dialogue(mut self, lines: impl IntoIterator<Item = DialogueLine>) -> Self {
        self.dialogue.extend(lines);
        self
    }

    pub fn with_character(mut self, spawn: CharacterSpawn) -> Self {
        self.characters.push(spawn);
        self
    }

    pub fn with_emitter(mut self, emitter: EmissionPolicy) -> Self {
        self.emitters.push(emitter);
        self
    }

    pub fn with_cue(mut self, cue: SceneCue) -> Self {
        self.cues.push(cue);
        self
    }

    /// 校验单个场景
    fn validate(&self, scene: usize) -> Result<(), StoryboardError> {
        let title = || self.title.clone();

        if let AdvancePolicy::AutoTimed { duration_ms } = self.advance
            && !(duration_ms.is_finite() && duration_ms > 0.0)
        {
            return Err(StoryboardError::InvalidDuration {
                scene,
                title: title(),
                duration_ms,
            });
        }

        if self.advance == AdvancePolicy::DialogueGated && self.dialogue.is_empty() {
            return Err(StoryboardError::GatedWithoutDialogue {
                scene,
                title: title(),
            });
        }

        let camera_error = |message: String| StoryboardError::InvalidCamera {
            scene,
            title: title(),
            message,
        };
        if let Some(from) = &self.camera.from
            && !from.is_valid()
        {
            return Err(camera_error(format!("起始机位无效 {from:?}")));
        }
        if !self.camera.to.is_valid() {
            return Err(camera_error(format!("目标机位无效 {:?}", self.camera.to)));
        }

        let shakes = self.camera.shake.iter().chain(self.cues.iter().filter_map(|cue| {
            match &cue.action {
                CueAction::Shake(shake) => Some(shake),
                CueAction::Signal { .. } => None,
            }
        }));
        for shake in shakes {
            check_timing(scene, &self.title, "shake.intensity", shake.intensity)?;
            check_timing(scene, &self.title, "shake.duration_ms", shake.duration_ms)?;
        }

        for (emitter, policy) in self.emitters.iter().enumerate() {
            if !(0.0..=1.0).contains(&policy.rate) {
                return Err(StoryboardError::InvalidEmissionRate {
                    scene,
                    title: title(),
                    emitter,
                    rate: policy.rate,
                });
            }
        }

        for cue in &self.cues {
            check_timing(scene, &self.title, "cue.at_ms", cue.at_ms)?;
        }

        for line in &self.dialogue {
            if let Some(hold) = line.hold_ms {
                check_timing(scene, &self.title, "dialogue.hold_ms", hold)?;
            }
        }

        Ok(())
    }
}

fn check_timing(scene: usize, title: &str, field: &str, value: f64) -> Result<(), StoryboardError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StoryboardError::InvalidTiming {
            scene,
            title: title.to_string(),
            field: field.to_string(),
            value,
        })
    }
}

/// 经过校验的有序场景列表
///
/// 反序列化时同样执行校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SceneDescriptor>", into = "Vec<SceneDescriptor>")]
pub struct Storyboard {
    scenes: Vec<SceneDescriptor>,
}

impl Storyboard {
    /// 校验并创建分镜
    ///
    /// 每个场景的 cue 会按触发时间排序。
    pub fn new(mut scenes: Vec<SceneDescriptor>) -> Result<Self, StoryboardError> {
        if scenes.is_empty() {
            return Err(StoryboardError::Empty);
        }

        for (index, scene) in scenes.iter_mut().enumerate() {
            scene.validate(index)?;
            scene.cues.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        }

        Ok(Self { scenes })
    }

    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// 校验保证非空，恒为 false
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// 所有台词总数
    pub fn dialogue_count(&self) -> usize {
        self.scenes.iter().map(|scene| scene.dialogue.len()).sum()
    }
}

impl TryFrom<Vec<SceneDescriptor>> for Storyboard {
    type Error = StoryboardError;

    fn try_from(scenes: Vec<SceneDescriptor>) -> Result<Self, Self::Error> {
        Self::new(scenes)
    }
}

impl From<Storyboard> for Vec<SceneDescriptor> {
    fn from(storyboard: Storyboard) -> Self {
        storyboard.scenes
    }
}
