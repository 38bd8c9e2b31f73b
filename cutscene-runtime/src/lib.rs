//! # Cutscene Runtime
//!
//! 过场动画（分镜）播放的核心运行时库。
//!
//! ## 架构概述
//!
//! `cutscene-runtime` 是纯逻辑核心，不依赖任何渲染引擎或窗口系统。
//! 它通过 **逐帧驱动 + 快照** 的模式与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── DirectorInput ──────────────►│ advance / restart / pause
//!   │──── update(dt) ─────────────────►│
//!   │◄─── RenderState ─────────────────│ render_state()
//!   │◄─── Vec<DirectorEvent> ──────────│ drain_events()
//!   │                                   │
//! ```
//!
//! ## 核心类型
//!
//! - [`Storyboard`]：经过校验的场景序列
//! - [`Director`]：播放调度器
//! - [`DirectorInput`]：Host 向 Runtime 传递的输入
//! - [`RenderState`]：每帧的只读渲染快照
//! - [`PlaybackState`]：可序列化的播放状态
//!
//! ## 使用示例
//!
//! ```ignore
//! use cutscene_runtime::{Clock, Director, DirectorConfig, Storyboard};
//!
//! let storyboard = Storyboard::new(scenes)?;
//! let mut director = Director::new(storyboard, DirectorConfig::default());
//! let mut clock = Clock::default();
//! director.start();
//!
//! while !director.is_finished() {
//!     director.update(clock.tick());
//!     renderer.render(&director.render_state());
//!
//!     for event in director.drain_events() {
//!         host.handle(event);
//!     }
//!     if let Some(input) = host.poll_input() {
//!         director.handle_input(input);
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`clock`]：帧时钟
//! - [`camera`]：镜头插值与抖动
//! - [`particle`]：粒子池
//! - [`dialogue`]：台词推进
//! - [`scene`]：场景描述与分镜校验
//! - [`director`]：播放调度
//! - [`render`]：渲染快照与渲染层接口
//! - [`error`]：错误类型定义

pub mod actor;
pub mod camera;
pub mod clock;
pub mod config;
pub mod dialogue;
pub mod director;
pub mod easing;
pub mod error;
pub mod history;
pub mod input;
pub mod particle;
pub mod render;
pub mod scene;
pub mod state;

// 重导出核心类型
pub use actor::{CharacterActor, CharacterHook, CharacterSpawn, NoopHook};
pub use camera::{CameraPose, CameraRig, CameraState, MIN_ZOOM, ShakeSpec};
pub use clock::{Clock, ManualTime, MonotonicTime, TimeSource};
pub use config::DirectorConfig;
pub use dialogue::{DialogueLine, DialogueSequencer, DialogueState};
pub use director::{Director, DirectorEvent};
pub use easing::Easing;
pub use error::{ConfigError, CutsceneError, CutsceneResult, StoryboardError};
pub use history::{History, HistoryEntry};
pub use input::DirectorInput;
pub use particle::{Particle, ParticleHandle, ParticleKind, ParticlePool};
pub use render::{DialogueView, RenderState, Renderer};
pub use scene::{
    AdvancePolicy, Backdrop, CameraTarget, CueAction, EmissionPolicy, EmissionRegion, SceneCue,
    SceneDescriptor, Storyboard,
};
pub use state::{DirectorPhase, PlaybackState, ScenePhase};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证所有公共类型都可以正常使用
        let scene = SceneDescriptor::new(
            "开场",
            CameraTarget::to(CameraPose::default()),
            AdvancePolicy::Manual,
        )
        .with_dialogue([DialogueLine::new("悟饭", "……")]);

        let storyboard = Storyboard::new(vec![scene]).unwrap();
        let mut director = Director::new(storyboard, DirectorConfig::default());
        director.handle_input(DirectorInput::Advance);

        let _state: &PlaybackState = director.playback();
        let _frame: RenderState<'_> = director.render_state();
        let _clock = Clock::new(ManualTime::new());
    }
}
