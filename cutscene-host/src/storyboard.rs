//! # Storyboard 模块
//!
//! 内置分镜「悟饭的觉醒」，以及从 JSON 文件加载分镜。

use std::fs;
use std::path::Path;

use cutscene_runtime::{
    AdvancePolicy, Backdrop, CameraPose, CameraTarget, CharacterActor, CharacterSpawn,
    DialogueLine, Easing, EmissionPolicy, EmissionRegion, ParticleKind, SceneCue,
    SceneDescriptor, ShakeSpec, Storyboard,
};
use tracing::info;

use crate::config::PlaybackConfig;
use crate::error::{HostError, HostResult};

/// 「无声的愤怒」中角色的状态标签，角色钩子据此产生颤抖
pub const TREMBLE_TAG: &str = "silent_rage";

/// 内置分镜
pub fn builtin() -> HostResult<Storyboard> {
    let android = "人造人16号";

    let scenes = vec![
        SceneDescriptor::new(
            "第一幕 崩溃前的寂静",
            CameraTarget::between(
                CameraPose::new(0.0, -200.0, 0.3),
                CameraPose::new(0.0, 100.0, 0.8),
            ),
            AdvancePolicy::AutoTimed {
                duration_ms: 8000.0,
            },
        )
        .with_backdrop(Backdrop::Painted {
            key: "destroyed_stadium".to_string(),
        })
        .with_character(CharacterSpawn::new("gohan", 0.0, 120.0).tagged("defeated"))
        .with_emitter(EmissionPolicy::new(
            ParticleKind::Dust,
            0.3,
            EmissionRegion::rect(0.0, 300.0, 600.0, 20.0),
        )),
        SceneDescriptor::new(
            "第二幕 16号最后的目光",
            CameraTarget::between(
                CameraPose::new(200.0, 0.0, 1.5),
                CameraPose::new(200.0, 0.0, 2.0),
            )
            .with_easing(Easing::EaseInOutSine),
            AdvancePolicy::AutoTimed {
                duration_ms: 10000.0,
            },
        )
        .with_backdrop(Backdrop::VerticalGradient {
            top: "#6b8f5e".to_string(),
            bottom: "#2f3f28".to_string(),
        })
        .with_character(CharacterSpawn::new("android16", 200.0, 0.0).tagged("damaged"))
        .with_dialogue([
            DialogueLine::new(android, "我喜欢的").held_for(1500.0),
            DialogueLine::new(android, "大自然和动物们……").held_for(2000.0),
            DialogueLine::new(android, "替.我.守.护.它.们.").held_for(2500.0),
            DialogueLine::new(android, "拜托了~").held_for(2000.0),
        ])
        .with_emitter(EmissionPolicy::new(
            ParticleKind::Spark,
            0.15,
            EmissionRegion::rect(230.0, -40.0, 30.0, 30.0),
        )),
        SceneDescriptor::new(
            "第三幕 沙鲁的一脚",
            CameraTarget::to(CameraPose::new(0.0, 80.0, 1.2))
                .with_shake(ShakeSpec::new(15.0, 600.0))
                .with_easing(Easing::EaseOutQuad),
            AdvancePolicy::AutoTimed {
                duration_ms: 4000.0,
            },
        )
        .with_backdrop(Backdrop::Solid {
            color: "#1a1a1a".to_string(),
        })
        .with_character(CharacterSpawn::new("cell", 0.0, -60.0).scaled(1.5).tagged("stomp"))
        .with_character(CharacterSpawn::new("android16", 0.0, 140.0).tagged("destroyed"))
        .with_emitter(EmissionPolicy::new(
            ParticleKind::Debris,
            0.6,
            EmissionRegion::rect(0.0, 140.0, 80.0, 10.0),
        ))
        .with_cue(SceneCue::signal(0.0, "sfx_cell")),
        SceneDescriptor::new(
            "第四幕 悟饭的眼瞳",
            CameraTarget::between(
                CameraPose::new(0.0, -30.0, 3.0),
                CameraPose::new(0.0, -30.0, 3.6),
            ),
            AdvancePolicy::AutoTimed {
                duration_ms: 5000.0,
            },
        )
        .with_backdrop(Backdrop::VerticalGradient {
            top: "#3a0000".to_string(),
            bottom: "#000000".to_string(),
        })
        .with_character(CharacterSpawn::new("gohan_eye", 0.0, -30.0).scaled(3.0))
        .with_character(CharacterSpawn::new("dove", 260.0, -180.0).tagged("flying"))
        .with_cue(SceneCue::signal(2500.0, "symbol_dove")),
        SceneDescriptor::new(
            "第五幕 无声的愤怒",
            CameraTarget::to(CameraPose::new(0.0, 0.0, 2.5)),
            AdvancePolicy::AutoTimed {
                duration_ms: 6000.0,
            },
        )
        .with_backdrop(Backdrop::Solid {
            color: "#000000".to_string(),
        })
        .with_character(
            CharacterSpawn::new("gohan", 0.0, 0.0)
                .scaled(4.0)
                .tagged(TREMBLE_TAG),
        )
        .with_cue(SceneCue::signal(1000.0, "sfx_scream"))
        .with_cue(SceneCue::shake(1000.0, ShakeSpec::new(20.0, 2000.0))),
        SceneDescriptor::new(
            "第六幕 觉醒",
            CameraTarget::between(CameraPose::new(0.0, 0.0, 1.8), CameraPose::default())
                .with_shake(ShakeSpec::new(10.0, 1000.0))
                .with_easing(Easing::EaseInOutCubic),
            AdvancePolicy::DialogueGated,
        )
        .with_backdrop(Backdrop::Painted {
            key: "explosion".to_string(),
        })
        .with_character(CharacterSpawn::new("gohan", 0.0, 0.0).tagged("super_saiyan_2"))
        .with_dialogue([DialogueLine::new("悟饭", "……够了。").held_for(2500.0)])
        .with_emitter(EmissionPolicy::new(
            ParticleKind::Ember,
            0.8,
            EmissionRegion::rect(0.0, 0.0, 120.0, 160.0),
        ))
        .with_emitter(EmissionPolicy::new(
            ParticleKind::Debris,
            0.4,
            EmissionRegion::rect(0.0, 200.0, 500.0, 10.0),
        ))
        .with_cue(SceneCue::signal(0.0, "sfx_transformation")),
    ];

    Ok(Storyboard::new(scenes)?)
}

/// 从 JSON 文件加载分镜
pub fn from_file(path: impl AsRef<Path>) -> HostResult<Storyboard> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| HostError::io(path, e))?;
    let storyboard: Storyboard = serde_json::from_str(&content)?;
    info!(path = ?path, scenes = storyboard.len(), "分镜文件加载成功");
    Ok(storyboard)
}

/// 按配置选择分镜：配置了路径则从文件加载，否则使用内置分镜
pub fn load(config: &PlaybackConfig) -> HostResult<Storyboard> {
    match &config.storyboard_path {
        Some(path) => from_file(path),
        None => builtin(),
    }
}

/// 角色钩子：「无声的愤怒」中的角色围绕生成位置微微颤抖
pub fn tremble(_scene: usize, actor: &mut CharacterActor, _dt_ms: f64) {
    if actor.state_tag == TREMBLE_TAG {
        let offset = (actor.age_ms * 0.01).sin() * 0.5;
        actor.x = actor.home_x + offset;
        actor.y = actor.home_y + offset * 0.5;
    }
}
