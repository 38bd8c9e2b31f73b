//! # Engine 模块
//!
//! 过场动画导演：持有分镜与播放状态，按时间与输入推进场景。
//!
//! ## 驱动模型
//!
//! ```text
//! 每帧:  update(dt) -> 台词停留 / cue / 镜头 / 粒子 / 角色 / 推进策略
//!        render_state() -> Renderer
//!        drain_events() -> 宿主（音效、UI）
//! 输入:  advance() / restart() / toggle_pause()
//! ```
//!
//! 运行期间不返回错误：越界载入即进入 `Finished`，非法时机的输入被忽略。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::active_scene::ActiveScene;
use super::event::DirectorEvent;
use crate::actor::{CharacterActor, CharacterHook, NoopHook};
use crate::camera::{CameraRig, CameraState};
use crate::config::DirectorConfig;
use crate::dialogue::{DialogueLine, DialogueSequencer};
use crate::history::{History, HistoryEntry};
use crate::input::DirectorInput;
use crate::particle::{Particle, ParticlePool};
use crate::render::{DialogueView, RenderState};
use crate::scene::{AdvancePolicy, CueAction, EmissionRegion, SceneDescriptor, Storyboard};
use crate::state::{DirectorPhase, PlaybackState, ScenePhase};

/// 发射随机流相对镜头随机流的种子偏移
const EMISSION_SEED_OFFSET: u64 = 0x9e37_79b9_7f4a_7c15;

/// 播放阶段（内部）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Loading,
    Playing,
    Finished,
}

/// 过场动画导演
///
/// 宿主显式构造一个实例并独占持有。
///
/// # 使用示例
///
/// ```ignore
/// let storyboard = Storyboard::new(scenes)?;
/// let mut director = Director::new(storyboard, DirectorConfig::default());
/// director.start();
///
/// loop {
///     director.update(clock.tick());
///     renderer.render(&director.render_state());
///     for event in director.drain_events() { /* 音效、UI */ }
/// }
/// ```
pub struct Director {
    storyboard: Storyboard,
    config: DirectorConfig,
    stage: Stage,
    playback: PlaybackState,
    camera: CameraRig,
    particles: ParticlePool,
    /// 粒子发射随机流
    rng: StdRng,
    scene: Option<ActiveScene>,
    events: Vec<DirectorEvent>,
    history: History,
    hook: Box<dyn CharacterHook>,
    on_finished: Option<Box<dyn FnMut()>>,
}

impl Director {
    /// 创建导演，处于 `Loading` 阶段
    pub fn new(storyboard: Storyboard, config: DirectorConfig) -> Self {
        Self {
            camera: CameraRig::new(config.seed),
            particles: ParticlePool::new(config.max_particles),
            rng: StdRng::seed_from_u64(config.seed ^ EMISSION_SEED_OFFSET),
            history: History::new(config.backlog_capacity),
            storyboard,
            config,
            stage: Stage::Loading,
            playback: PlaybackState::new(),
            scene: None,
            events: Vec::new(),
            hook: Box::new(NoopHook),
            on_finished: None,
        }
    }

    /// 设置角色更新钩子
    pub fn with_hook(mut self, hook: impl CharacterHook + 'static) -> Self {
        self.set_character_hook(hook);
        self
    }

    pub fn set_character_hook(&mut self, hook: impl CharacterHook + 'static) {
        self.hook = Box::new(hook);
    }

    /// 设置播完回调
    pub fn on_finished(&mut self, callback: impl FnMut() + 'static) {
        self.on_finished = Some(Box::new(callback));
    }

    //=== 入口 ==============================================================

    /// 从 `Loading` 开始播放第一个场景；其他阶段无操作
    pub fn start(&mut self) {
        if self.stage != Stage::Loading {
            return;
        }
        info!(scenes = self.storyboard.len(), "开始播放");
        self.playback.is_playing = true;
        self.load_scene(0);
    }

    /// 载入指定场景
    ///
    /// `index >= 场景数` 时进入 `Finished` 并触发播完回调。
    /// 粒子不会被清空，上一场景的粒子自然消亡。
    pub fn load_scene(&mut self, index: usize) {
        let Some(descriptor) = self.storyboard.get(index) else {
            self.finish();
            return;
        };

        self.stage = Stage::Playing;
        self.playback.is_playing = true;
        self.playback.enter_scene(index);

        let from = descriptor.camera.from.unwrap_or_else(|| self.camera.pose());
        self.camera.begin(from, descriptor.camera.easing);
        self.camera.set_target(descriptor.camera.to, 0.0);
        if let Some(shake) = descriptor.camera.shake {
            self.camera.apply_shake(shake.intensity, shake.duration_ms);
        }

        info!(scene = index, title = %descriptor.title, "进入场景");
        self.events.push(DirectorEvent::SceneEntered {
            scene: index,
            title: descriptor.title.clone(),
        });
        self.history.push(HistoryEntry::SceneEntered {
            scene: index,
            title: descriptor.title.clone(),
        });

        self.scene = Some(ActiveScene::load(index, descriptor));
        self.sync_dialogue();
    }

    /// 推进一帧
    ///
    /// 未在播放、已暂停或已播完时无操作。
    pub fn update(&mut self, dt_ms: f64) {
        if self.stage != Stage::Playing || self.playback.is_paused {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let Some(descriptor) = self.storyboard.get(scene.index) else {
            return;
        };

        let dt = sanitize_dt(dt_ms);
        self.playback.scene_elapsed_ms += dt;
        self.playback.tick_count += 1;
        let elapsed = self.playback.scene_elapsed_ms;

        // 1. 台词停留计时
        scene.dialogue.tick(dt);
        let hold_advanced = scene.dialogue.hold_elapsed() && scene.dialogue.advance();

        // 2. 到期的 cue
        for cue in scene.due_cues(descriptor, elapsed) {
            match &cue.action {
                CueAction::Shake(shake) => {
                    debug!(scene = scene.index, at_ms = cue.at_ms, "cue: 镜头抖动");
                    self.camera.apply_shake(shake.intensity, shake.duration_ms);
                }
                CueAction::Signal { name } => {
                    debug!(scene = scene.index, signal = %name, "cue: 宿主信号");
                    self.events.push(DirectorEvent::CueFired {
                        scene: scene.index,
                        name: name.clone(),
                    });
                }
            }
        }

        // 3. 镜头
        let progress = scene_progress(descriptor, elapsed, self.config.camera_ramp_ms);
        self.camera.set_target(descriptor.camera.to, progress);
        self.camera.tick(dt);

        // 4. 粒子发射与更新
        for emitter in &descriptor.emitters {
            if self.rng.gen_bool(emitter.rate) {
                let (x, y) = sample_region(&mut self.rng, &emitter.region);
                self.particles.spawn(emitter.kind, x, y, &mut self.rng);
            }
        }
        self.particles.update(dt);

        // 5. 角色
        for actor in &mut scene.actors {
            actor.age_ms += dt;
            self.hook.update(scene.index, actor, dt);
        }

        let policy = descriptor.advance;
        let dialogue_idle = scene.dialogue.is_idle();
        let dialogue_exhausted = scene.dialogue.is_exhausted();

        if hold_advanced {
            self.sync_dialogue();
        }

        // 6. 推进策略：未读完的台词总是阻止自动推进
        match policy {
            AdvancePolicy::AutoTimed { duration_ms } if dialogue_idle && elapsed >= duration_ms => {
                self.advance_scene();
            }
            AdvancePolicy::DialogueGated if dialogue_exhausted => {
                self.advance_scene();
            }
            _ => {}
        }
    }

    /// 用户推进
    ///
    /// 有台词时推进台词，否则推进场景（与场景的推进策略无关）。
    /// `Loading` 时等同于 `start()`；已暂停或已播完时无操作。
    pub fn advance(&mut self) {
        match self.stage {
            Stage::Loading => {
                self.start();
                return;
            }
            Stage::Finished => return,
            Stage::Playing => {}
        }

        if self.playback.is_paused {
            debug!("暂停中，忽略推进");
            return;
        }

        let advanced_dialogue = self
            .scene
            .as_mut()
            .is_some_and(|scene| scene.dialogue.advance());

        if advanced_dialogue {
            self.sync_dialogue();
        } else {
            self.advance_scene();
        }
    }

    /// 进入下一个场景
    pub fn advance_scene(&mut self) {
        if self.stage != Stage::Playing {
            return;
        }
        self.load_scene(self.playback.active_scene_index + 1);
    }

    /// 从第一个场景重新播放
    ///
    /// 清空粒子与回看记录、重置镜头与随机流；连续调用两次与调用一次结果相同。
    pub fn restart(&mut self) {
        info!("重新播放");
        self.particles.clear();
        self.camera = CameraRig::new(self.config.seed);
        self.rng = StdRng::seed_from_u64(self.config.seed ^ EMISSION_SEED_OFFSET);
        self.history.clear();
        self.playback = PlaybackState::new();
        self.events.push(DirectorEvent::Restarted);
        self.load_scene(0);
    }

    /// 设置暂停状态，仅在播放中有效
    pub fn set_paused(&mut self, paused: bool) {
        if self.stage != Stage::Playing || self.playback.is_paused == paused {
            return;
        }
        self.playback.is_paused = paused;
        if paused {
            info!(scene = self.playback.active_scene_index, "暂停");
            self.events.push(DirectorEvent::Paused);
        } else {
            info!(scene = self.playback.active_scene_index, "继续");
            self.events.push(DirectorEvent::Resumed);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.playback.is_paused);
    }

    /// 处理宿主输入
    pub fn handle_input(&mut self, input: DirectorInput) {
        match input {
            DirectorInput::Advance => self.advance(),
            DirectorInput::Restart => self.restart(),
            DirectorInput::TogglePause => self.toggle_pause(),
        }
    }

    //=== 内部 ==============================================================

    fn finish(&mut self) {
        // 播完后保持终止，直到 restart()
        if self.stage == Stage::Finished {
            return;
        }
        let total = self.storyboard.len();
        self.stage = Stage::Finished;
        self.scene = None;
        self.playback.enter_scene(total);
        self.playback.is_playing = false;
        self.playback.is_paused = false;
        self.playback.is_dialogue_showing = false;

        info!(scenes = total, "播放结束");
        self.events.push(DirectorEvent::Finished);
        if let Some(callback) = self.on_finished.as_mut() {
            callback();
        }
    }

    /// 把台词推进器的状态同步到播放状态，并记录事件
    fn sync_dialogue(&mut self) {
        let Some(scene) = &self.scene else {
            self.playback.is_dialogue_showing = false;
            return;
        };

        self.playback.dialogue_cursor = scene.dialogue.cursor();
        self.playback.is_dialogue_showing = !scene.dialogue.is_idle();

        if let Some(line) = scene.dialogue.current_line() {
            self.events.push(DirectorEvent::DialogueShown {
                scene: scene.index,
                index: scene.dialogue.cursor(),
                speaker: line.speaker.clone(),
                text: line.text.clone(),
            });
            self.history.push(HistoryEntry::Dialogue {
                scene: scene.index,
                speaker: line.speaker.clone(),
                text: line.text.clone(),
                scene_time_ms: self.playback.scene_elapsed_ms,
            });
        } else if scene.dialogue.is_exhausted() {
            self.events.push(DirectorEvent::DialogueExhausted { scene: scene.index });
        }
    }

    //=== 查询 ==============================================================

    pub fn phase(&self) -> DirectorPhase {
        match self.stage {
            Stage::Loading => DirectorPhase::Loading,
            Stage::Finished => DirectorPhase::Finished,
            Stage::Playing => {
                let sub = match &self.scene {
                    Some(scene) if !scene.dialogue.is_idle() => ScenePhase::DialogueActive,
                    _ => ScenePhase::AwaitingAdvance,
                };
                DirectorPhase::Playing {
                    scene: self.playback.active_scene_index,
                    sub,
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn camera(&self) -> &CameraState {
        self.camera.state()
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    /// 当前场景的台词推进器
    pub fn dialogue(&self) -> Option<&DialogueSequencer> {
        self.scene.as_ref().map(|scene| &scene.dialogue)
    }

    pub fn current_line(&self) -> Option<&DialogueLine> {
        self.dialogue().and_then(DialogueSequencer::current_line)
    }

    pub fn actors(&self) -> &[CharacterActor] {
        self.scene
            .as_ref()
            .map(|scene| scene.actors.as_slice())
            .unwrap_or_default()
    }

    pub fn active_scene(&self) -> Option<&SceneDescriptor> {
        self.scene
            .as_ref()
            .and_then(|scene| self.storyboard.get(scene.index))
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// 已显示台词的回看记录
    pub fn backlog(&self) -> &History {
        &self.history
    }

    /// 当前场景进度（0.0 - 1.0）
    pub fn progress(&self) -> f64 {
        match (self.stage, self.active_scene()) {
            (Stage::Playing, Some(descriptor)) => scene_progress(
                descriptor,
                self.playback.scene_elapsed_ms,
                self.config.camera_ramp_ms,
            ),
            (Stage::Finished, _) => 1.0,
            _ => 0.0,
        }
    }

    /// 待处理的事件
    pub fn events(&self) -> &[DirectorEvent] {
        &self.events
    }

    /// 取走所有待处理事件
    pub fn drain_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }

    /// 构建本帧的渲染快照
    pub fn render_state(&self) -> RenderState<'_> {
        let descriptor = self.active_scene();
        let dialogue = self.dialogue().and_then(|seq| {
            seq.current_line()
                .map(|line| DialogueView::new(line, seq.cursor(), seq.len()))
        });

        RenderState {
            phase: self.phase(),
            camera: *self.camera.state(),
            active_scene_index: self.playback.active_scene_index,
            scene_title: descriptor.map(|d| d.title.as_str()),
            backdrop: descriptor.map(|d| &d.backdrop),
            progress: self.progress(),
            characters: self.actors(),
            particles: self.particles(),
            dialogue,
            is_paused: self.playback.is_paused,
        }
    }
}

/// 非有限或负的 dt 视为 0
fn sanitize_dt(dt_ms: f64) -> f64 {
    if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 }
}

/// 场景进度：自动计时场景按时长，其余按固定镜头窗口
fn scene_progress(descriptor: &SceneDescriptor, elapsed_ms: f64, ramp_ms: f64) -> f64 {
    let window = match descriptor.advance {
        AdvancePolicy::AutoTimed { duration_ms } => duration_ms,
        AdvancePolicy::Manual | AdvancePolicy::DialogueGated => ramp_ms,
    };
    if window > 0.0 {
        (elapsed_ms / window).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// 在发射区域内均匀取点
fn sample_region(rng: &mut StdRng, region: &EmissionRegion) -> (f64, f64) {
    let ux: f64 = rng.gen_range(-1.0..=1.0);
    let uy: f64 = rng.gen_range(-1.0..=1.0);
    (
        region.x + ux * region.half_width,
        region.y + uy * region.half_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraPose, ShakeSpec};
    use crate::particle::ParticleKind;
    use crate::scene::{CameraTarget, EmissionPolicy, SceneCue};
    use std::cell::Cell;
    use std::rc::Rc;

    fn manual(title: &str, lines: usize) -> SceneDescriptor {
        SceneDescriptor::new(
            title,
            CameraTarget::to(CameraPose::default()),
            AdvancePolicy::Manual,
        )
        .with_dialogue((0..lines).map(|i| DialogueLine::new("A", format!("{title}-{i}"))))
    }

    fn timed(title: &str, duration_ms: f64) -> SceneDescriptor {
        SceneDescriptor::new(
            title,
            CameraTarget::to(CameraPose::default()),
            AdvancePolicy::AutoTimed { duration_ms },
        )
    }

    fn director(scenes: Vec<SceneDescriptor>) -> Director {
        let storyboard = Storyboard::new(scenes).unwrap();
        let mut director = Director::new(storyboard, DirectorConfig::with_seed(1));
        director.start();
        director
    }

    #[test]
    fn test_starts_in_loading() {
        let storyboard = Storyboard::new(vec![manual("a", 0)]).unwrap();
        let mut director = Director::new(storyboard, DirectorConfig::default());
        assert_eq!(director.phase(), DirectorPhase::Loading);

        // Loading 阶段不响应 update
        director.update(100.0);
        assert_eq!(director.playback().scene_elapsed_ms, 0.0);

        // 点击开始播放
        director.advance();
        assert!(matches!(director.phase(), DirectorPhase::Playing { scene: 0, .. }));
        assert!(director.playback().is_playing);
    }

    #[test]
    fn test_load_scene_resets_timing() {
        let mut director = director(vec![manual("a", 2), manual("b", 3), timed("c", 500.0)]);
        for index in [1, 2, 0, 2] {
            director.update(250.0);
            director.advance();
            director.load_scene(index);
            assert_eq!(director.playback().active_scene_index, index);
            assert_eq!(director.playback().scene_elapsed_ms, 0.0);
            assert_eq!(director.playback().dialogue_cursor, 0);
        }
    }

    #[test]
    fn test_four_lines_need_four_advances() {
        let mut director = director(vec![manual("a", 4), manual("b", 0)]);
        assert!(matches!(
            director.phase(),
            DirectorPhase::Playing { sub: ScenePhase::DialogueActive, .. }
        ));

        for _ in 0..4 {
            assert_eq!(director.playback().active_scene_index, 0);
            director.advance();
        }
        assert_eq!(director.playback().active_scene_index, 0);
        assert_eq!(director.playback().dialogue_cursor, 4);
        assert!(!director.playback().is_dialogue_showing);
        assert!(matches!(
            director.phase(),
            DirectorPhase::Playing { sub: ScenePhase::AwaitingAdvance, .. }
        ));

        director.advance();
        assert_eq!(director.playback().active_scene_index, 1);
        assert!(director.backlog().entries().all(|e| e.scene() <= 1));
        assert_eq!(director.backlog().dialogue_count(), 4);
    }

    #[test]
    fn test_auto_timed_advances_at_duration() {
        let mut director = director(vec![timed("a", 2000.0), manual("b", 0)]);

        director.update(1000.0);
        director.update(999.0);
        assert_eq!(director.playback().active_scene_index, 0);

        director.update(1.0);
        assert_eq!(director.playback().active_scene_index, 1);
    }

    #[test]
    fn test_pending_dialogue_blocks_auto_advance() {
        let mut director = director(vec![
            timed("a", 100.0).with_dialogue([DialogueLine::new("A", "wait")]),
            manual("b", 0),
        ]);

        director.update(5000.0);
        assert_eq!(director.playback().active_scene_index, 0);
        assert_eq!(director.progress(), 1.0);

        director.advance();
        assert_eq!(director.playback().active_scene_index, 0);
        // 台词读完后下一帧自动推进
        director.update(16.0);
        assert_eq!(director.playback().active_scene_index, 1);
    }

    #[test]
    fn test_dialogue_gated_advances_after_exhaustion() {
        let gated = SceneDescriptor::new(
            "gated",
            CameraTarget::to(CameraPose::default()),
            AdvancePolicy::DialogueGated,
        )
        .with_dialogue([DialogueLine::new("A", "1"), DialogueLine::new("A", "2")]);
        let mut director = director(vec![gated, manual("b", 0)]);

        director.advance();
        director.update(16.0);
        assert_eq!(director.playback().active_scene_index, 0);

        director.advance();
        director.update(16.0);
        assert_eq!(director.playback().active_scene_index, 1);
    }

    #[test]
    fn test_manual_scene_never_self_advances() {
        let mut director = director(vec![manual("a", 0), manual("b", 0)]);
        for _ in 0..1000 {
            director.update(100.0);
        }
        assert_eq!(director.playback().active_scene_index, 0);
    }

    #[test]
    fn test_hold_ms_auto_advances_line() {
        let mut director = director(vec![
            SceneDescriptor::new(
                "held",
                CameraTarget::to(CameraPose::default()),
                AdvancePolicy::Manual,
            )
            .with_dialogue([
                DialogueLine::new("16号", "一").held_for(1500.0),
                DialogueLine::new("16号", "二"),
            ]),
        ]);

        director.update(1499.0);
        assert_eq!(director.playback().dialogue_cursor, 0);
        director.update(1.0);
        assert_eq!(director.playback().dialogue_cursor, 1);
        assert_eq!(director.current_line().map(|l| l.text.as_str()), Some("二"));
    }

    #[test]
    fn test_finish_invokes_callback_once() {
        let finished = Rc::new(Cell::new(0));
        let counter = Rc::clone(&finished);

        let mut director = director(vec![manual("a", 0)]);
        director.on_finished(move || counter.set(counter.get() + 1));

        director.advance();
        assert!(director.is_finished());
        assert_eq!(director.playback().active_scene_index, 1);
        assert!(!director.playback().is_playing);
        assert_eq!(finished.get(), 1);

        for _ in 0..10 {
            director.update(100.0);
            director.advance();
            director.advance_scene();
        }
        assert_eq!(director.playback().active_scene_index, 1);
        assert_eq!(finished.get(), 1);
        assert!(director.drain_events().contains(&DirectorEvent::Finished));
    }

    #[test]
    fn test_out_of_range_load_after_finish_is_ignored() {
        let finished = Rc::new(Cell::new(0));
        let counter = Rc::clone(&finished);

        let mut director = director(vec![manual("a", 0)]);
        director.on_finished(move || counter.set(counter.get() + 1));
        director.advance();
        assert!(director.is_finished());

        director.load_scene(1);
        director.load_scene(5);
        assert!(director.is_finished());
        assert_eq!(finished.get(), 1);
        let ends = director
            .drain_events()
            .into_iter()
            .filter(|event| *event == DirectorEvent::Finished)
            .count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_extreme_shake_does_not_panic() {
        let mut director = director(vec![
            SceneDescriptor::new(
                "quake",
                CameraTarget::to(CameraPose::default()).with_shake(ShakeSpec::new(1e308, 1000.0)),
                AdvancePolicy::Manual,
            ),
        ]);
        for _ in 0..10 {
            director.update(16.0);
        }
        assert!(director.camera().is_shaking());
        assert!(director.camera().view_x().is_finite());
    }

    #[test]
    fn test_restart_twice_equals_once() {
        let scenes = vec![
            manual("a", 2)
                .with_emitter(EmissionPolicy::new(
                    ParticleKind::Dust,
                    1.0,
                    EmissionRegion::rect(0.0, 0.0, 50.0, 50.0),
                ))
                .with_cue(SceneCue::shake(10.0, ShakeSpec::new(5.0, 500.0))),
            timed("b", 300.0),
        ];

        let mut once = director(scenes.clone());
        let mut twice = director(scenes);
        for director in [&mut once, &mut twice] {
            for _ in 0..5 {
                director.update(16.0);
            }
            director.advance();
            director.advance();
            director.advance();
            director.update(16.0);
        }

        once.restart();
        twice.restart();
        twice.restart();

        assert_eq!(once.playback(), twice.playback());
        assert_eq!(once.camera(), twice.camera());
        assert_eq!(once.particles(), twice.particles());
        assert_eq!(once.phase(), twice.phase());
        assert_eq!(twice.playback().active_scene_index, 0);
        assert_eq!(twice.playback().dialogue_cursor, 0);
        assert!(twice.particles().is_empty());

        // 重播后的随机序列一致
        for _ in 0..20 {
            once.update(16.0);
            twice.update(16.0);
        }
        assert_eq!(once.camera(), twice.camera());
        assert_eq!(once.particles(), twice.particles());
    }

    #[test]
    fn test_restart_from_finished() {
        let mut director = director(vec![manual("a", 0), manual("b", 0)]);
        director.advance();
        director.advance();
        assert!(director.is_finished());

        director.restart();
        assert!(matches!(director.phase(), DirectorPhase::Playing { scene: 0, .. }));
        assert!(director.playback().is_playing);
    }

    #[test]
    fn test_pause_freezes_update_and_input() {
        let mut director = director(vec![timed("a", 100.0), manual("b", 0)]);
        director.toggle_pause();
        assert!(director.playback().is_paused);

        director.update(1000.0);
        director.advance();
        assert_eq!(director.playback().active_scene_index, 0);
        assert_eq!(director.playback().scene_elapsed_ms, 0.0);

        director.handle_input(DirectorInput::TogglePause);
        director.update(100.0);
        assert_eq!(director.playback().active_scene_index, 1);

        let events: Vec<_> = director.drain_events();
        assert!(events.contains(&DirectorEvent::Paused));
        assert!(events.contains(&DirectorEvent::Resumed));
    }

    #[test]
    fn test_particles_survive_scene_change() {
        let mut director = director(vec![
            manual("dust", 0).with_emitter(EmissionPolicy::new(
                ParticleKind::Dust,
                1.0,
                EmissionRegion::point(0.0, 0.0),
            )),
            manual("quiet", 0),
        ]);

        director.update(16.0);
        assert_eq!(director.particles().len(), 1);

        director.advance();
        assert_eq!(director.playback().active_scene_index, 1);
        assert_eq!(director.particles().len(), 1);

        // 新场景没有发射器，旧粒子按自身寿命消亡
        for _ in 0..200 {
            director.update(16.0);
        }
        assert!(director.particles().is_empty());
    }

    #[test]
    fn test_camera_follows_scene_target() {
        let scene = SceneDescriptor::new(
            "pan",
            CameraTarget::between(
                CameraPose::new(0.0, -200.0, 0.3),
                CameraPose::new(0.0, 100.0, 0.8),
            ),
            AdvancePolicy::AutoTimed {
                duration_ms: 8000.0,
            },
        );
        let mut director = director(vec![scene]);
        assert_eq!(director.camera().pose(), CameraPose::new(0.0, -200.0, 0.3));

        director.update(4000.0);
        let camera = director.camera();
        assert!((camera.y - -50.0).abs() < 1e-9);
        assert!((camera.zoom - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_scene_shake_and_signal_cue() {
        let scene = manual("scream", 0)
            .with_cue(SceneCue::signal(0.0, "sfx_scream"))
            .with_cue(SceneCue::shake(1000.0, ShakeSpec::new(20.0, 2000.0)));
        let mut director = director(vec![scene]);

        director.update(16.0);
        assert!(director.drain_events().contains(&DirectorEvent::CueFired {
            scene: 0,
            name: "sfx_scream".to_string(),
        }));
        assert!(!director.camera().is_shaking());

        director.update(1000.0);
        assert!(director.camera().is_shaking());
        assert_eq!(director.camera().shake_intensity, 20.0);
    }

    #[test]
    fn test_character_hook_receives_dt() {
        let total = Rc::new(Cell::new(0.0));
        let seen = Rc::clone(&total);

        let storyboard = Storyboard::new(vec![manual("a", 0).with_character(
            crate::actor::CharacterSpawn::new("gohan", 0.0, 0.0),
        )])
        .unwrap();
        let mut director = Director::new(storyboard, DirectorConfig::default()).with_hook(
            move |_scene: usize, _actor: &mut CharacterActor, dt: f64| seen.set(seen.get() + dt),
        );
        director.start();

        director.update(16.0);
        director.update(20.0);
        assert_eq!(total.get(), 36.0);
        assert_eq!(director.actors()[0].age_ms, 36.0);
    }

    #[test]
    fn test_invalid_dt_ignored() {
        let mut director = director(vec![timed("a", 100.0)]);
        director.update(f64::NAN);
        director.update(-50.0);
        director.update(f64::INFINITY);
        assert_eq!(director.playback().scene_elapsed_ms, 0.0);
        assert_eq!(director.playback().active_scene_index, 0);
    }

    #[test]
    fn test_render_state_snapshot() {
        let mut director = director(vec![
            manual("a", 1).with_character(crate::actor::CharacterSpawn::new("16", 0.0, 0.0)),
        ]);
        let frame = director.render_state();
        assert_eq!(frame.scene_title, Some("a"));
        assert_eq!(frame.characters.len(), 1);
        let dialogue = frame.dialogue.unwrap();
        assert_eq!(dialogue.text, "a-0");
        assert_eq!(dialogue.total, 1);

        director.advance();
        director.advance();
        let frame = director.render_state();
        assert_eq!(frame.phase, DirectorPhase::Finished);
        assert!(frame.scene_title.is_none());
        assert!(frame.dialogue.is_none());
        assert_eq!(frame.progress, 1.0);
    }
}
