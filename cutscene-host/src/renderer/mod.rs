//! # Renderer 模块
//!
//! 无头渲染器：把每帧的 RenderState 输出到日志。
//!
//! ## 输出策略
//!
//! - 场景标题、台词变化时输出 `info`（相当于屏幕上的场景指示器与对话框）
//! - 每帧的镜头与粒子信息输出 `trace`
//! - 同时统计帧数、粒子峰值等，运行结束时写入摘要

use cutscene_runtime::{RenderState, Renderer};
use serde::Serialize;
use tracing::{info, trace};

/// 渲染统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameStats {
    /// 已渲染帧数
    pub frames: u64,
    /// 同屏粒子数峰值
    pub peak_particles: usize,
    /// 镜头处于抖动中的帧数
    pub shaking_frames: u64,
    /// 显示过的台词数
    pub lines_displayed: usize,
}

/// 日志渲染器
#[derive(Debug, Default)]
pub struct TraceRenderer {
    stats: FrameStats,
    /// 上一帧的场景
    last_scene: Option<usize>,
    /// 上一帧的台词（场景、序号）
    last_line: Option<(usize, usize)>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, frame: &RenderState<'_>) {
        self.stats.frames += 1;
        self.stats.peak_particles = self.stats.peak_particles.max(frame.particles.len());
        if frame.camera.is_shaking() {
            self.stats.shaking_frames += 1;
        }

        let scene = frame.active_scene_index;
        if let Some(title) = frame.scene_title
            && self.last_scene != Some(scene)
        {
            info!(scene, title, backdrop = ?frame.backdrop, "场景");
            self.last_scene = Some(scene);
            self.last_line = None;
        }

        match frame.dialogue {
            Some(line) if self.last_line != Some((scene, line.index)) => {
                info!(
                    speaker = line.speaker,
                    line = line.index + 1,
                    total = line.total,
                    "{}",
                    line.text
                );
                self.stats.lines_displayed += 1;
                self.last_line = Some((scene, line.index));
            }
            Some(_) => {}
            None => self.last_line = None,
        }

        trace!(
            x = frame.camera.view_x(),
            y = frame.camera.view_y(),
            zoom = frame.camera.zoom,
            particles = frame.particles.len(),
            characters = frame.characters.len(),
            progress = frame.progress,
            paused = frame.is_paused,
            "帧"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutscene_runtime::{
        AdvancePolicy, CameraPose, CameraTarget, DialogueLine, Director, DirectorConfig,
        SceneDescriptor, ShakeSpec, Storyboard,
    };

    #[test]
    fn test_stats_count_lines_once() {
        let storyboard = Storyboard::new(vec![
            SceneDescriptor::new(
                "16号",
                CameraTarget::to(CameraPose::default()).with_shake(ShakeSpec::new(4.0, 100.0)),
                AdvancePolicy::Manual,
            )
            .with_dialogue([DialogueLine::new("16号", "一"), DialogueLine::new("16号", "二")]),
        ])
        .unwrap();
        let mut director = Director::new(storyboard, DirectorConfig::default());
        director.start();

        let mut renderer = TraceRenderer::new();
        renderer.render(&director.render_state());
        director.update(16.0);
        renderer.render(&director.render_state());
        director.advance();
        renderer.render(&director.render_state());

        let stats = renderer.stats();
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.lines_displayed, 2);
        assert_eq!(stats.shaking_frames, 3);
    }
}
