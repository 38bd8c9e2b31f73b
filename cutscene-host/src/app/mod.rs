//! # App 模块
//!
//! 无头宿主主循环：帧时钟 → 输入 → Director::update → 渲染 → 事件处理。
//!
//! ## 时钟模式
//!
//! - 模拟时钟（默认）：每帧固定推进 `frame_interval_ms`，不休眠，适合测试与离线检查
//! - 真实时钟：按帧间隔休眠，dt 来自单调时钟

use std::time::Duration;

use cutscene_runtime::{
    Clock, Director, DirectorEvent, ManualTime, MonotonicTime, Renderer, Storyboard,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::HostResult;
use crate::input::{HostEvent, InputManager};
use crate::renderer::{FrameStats, TraceRenderer};
use crate::storyboard;

/// 帧计时器
#[derive(Debug)]
enum FrameTimer {
    Simulated {
        clock: Clock<ManualTime>,
        step_ms: f64,
    },
    Realtime {
        clock: Clock<MonotonicTime>,
        interval: Duration,
    },
}

impl FrameTimer {
    fn new(frame_interval_ms: f64, realtime: bool) -> Self {
        let mut timer = if realtime {
            FrameTimer::Realtime {
                clock: Clock::default(),
                interval: Duration::from_secs_f64(frame_interval_ms / 1000.0),
            }
        } else {
            FrameTimer::Simulated {
                clock: Clock::new(ManualTime::new()),
                step_ms: frame_interval_ms,
            }
        };
        // 第一次采样只建立基准
        timer.tick();
        timer
    }

    fn tick(&mut self) -> f64 {
        match self {
            FrameTimer::Simulated { clock, .. } => clock.tick(),
            FrameTimer::Realtime { clock, .. } => clock.tick(),
        }
    }

    /// 等待下一帧，返回帧间隔（毫秒）
    fn next_frame(&mut self) -> f64 {
        match self {
            FrameTimer::Simulated { clock, step_ms } => {
                clock.source_mut().advance(*step_ms);
                clock.tick()
            }
            FrameTimer::Realtime { clock, interval } => {
                std::thread::sleep(*interval);
                clock.tick()
            }
        }
    }

    /// 自启动以来的时间（毫秒）
    fn now_ms(&self) -> f64 {
        match self {
            FrameTimer::Simulated { clock, .. } => clock.elapsed_ms(),
            FrameTimer::Realtime { clock, .. } => clock.elapsed_ms(),
        }
    }

    fn fps(&self) -> f64 {
        match self {
            FrameTimer::Simulated { clock, .. } => clock.fps(),
            FrameTimer::Realtime { clock, .. } => clock.fps(),
        }
    }
}

/// 运行摘要
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// 主循环执行的帧数
    pub frames: u64,
    /// 模拟或真实经过的时间（毫秒）
    pub elapsed_ms: f64,
    /// 进入场景的次数（重播会重复计数）
    pub scenes_entered: usize,
    /// 显示过的台词数
    pub lines_shown: usize,
    /// 按触发顺序记录的宿主信号
    pub signals: Vec<String>,
    /// 完整播完的次数
    pub plays_completed: u32,
    /// 是否因达到最大帧数而停止
    pub hit_frame_limit: bool,
    /// 渲染统计
    pub render: FrameStats,
}

/// 无头宿主
pub struct App {
    config: AppConfig,
    director: Director,
    input: InputManager,
    renderer: TraceRenderer,
    timer: FrameTimer,
    /// 下一次模拟点击的时间
    next_click_ms: Option<f64>,
    summary: RunSummary,
}

impl App {
    /// 使用给定分镜创建宿主
    pub fn new(config: AppConfig, storyboard: Storyboard) -> HostResult<Self> {
        config.validate()?;

        let director =
            Director::new(storyboard, config.director.clone()).with_hook(storyboard::tremble);

        Ok(Self {
            input: InputManager::new(config.input.min_advance_interval_ms),
            renderer: TraceRenderer::new(),
            timer: FrameTimer::new(
                config.playback.frame_interval_ms,
                config.playback.realtime,
            ),
            next_click_ms: config.playback.auto_advance_interval_ms,
            director,
            config,
            summary: RunSummary::default(),
        })
    }

    /// 按配置加载分镜并创建宿主
    pub fn from_config(config: AppConfig) -> HostResult<Self> {
        let storyboard = storyboard::load(&config.playback)?;
        Self::new(config, storyboard)
    }

    pub fn director(&self) -> &Director {
        &self.director
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// 处理一个原始输入事件
    pub fn handle_event(&mut self, event: HostEvent) {
        let now = self.timer.now_ms();
        if let Some(input) = self
            .input
            .translate(event, now, self.director.is_finished())
        {
            debug!(?event, ?input, "输入");
            self.director.handle_input(input);
        }
    }

    /// 执行一帧
    ///
    /// 返回是否需要继续运行。
    pub fn step(&mut self) -> bool {
        let dt = self.timer.next_frame();
        let now = self.timer.now_ms();

        // 模拟观众点击
        if let Some(at) = self.next_click_ms
            && now >= at
            && !self.director.is_finished()
        {
            self.handle_event(HostEvent::Tap);
            self.next_click_ms = self
                .config
                .playback
                .auto_advance_interval_ms
                .map(|interval| at + interval);
        }

        self.director.update(dt);
        self.renderer.render(&self.director.render_state());
        self.process_events();

        self.summary.frames += 1;
        self.summary.elapsed_ms = now;

        if self.director.is_finished() {
            if self.summary.plays_completed >= self.config.playback.loops {
                return false;
            }
            // 播完后点击重播
            self.handle_event(HostEvent::Tap);
        }

        if self.summary.frames >= self.config.playback.max_frames {
            warn!(
                frames = self.summary.frames,
                scene = self.director.playback().active_scene_index,
                "达到最大帧数，停止播放"
            );
            self.summary.hit_frame_limit = true;
            return false;
        }

        true
    }

    /// 运行到播完（或达到最大帧数）
    pub fn run(mut self) -> RunSummary {
        info!(
            scenes = self.director.storyboard().len(),
            realtime = self.config.playback.realtime,
            loops = self.config.playback.loops,
            "开始无头播放"
        );

        // 点击开始
        self.handle_event(HostEvent::Tap);
        self.process_events();

        while self.step() {}

        self.summary.render = self.renderer.stats().clone();
        info!(
            frames = self.summary.frames,
            elapsed_ms = self.summary.elapsed_ms,
            lines = self.summary.lines_shown,
            peak_particles = self.summary.render.peak_particles,
            fps = self.timer.fps(),
            "播放结束"
        );
        self.summary
    }

    fn process_events(&mut self) {
        for event in self.director.drain_events() {
            match event {
                DirectorEvent::SceneEntered { .. } => self.summary.scenes_entered += 1,
                DirectorEvent::DialogueShown { .. } => self.summary.lines_shown += 1,
                DirectorEvent::CueFired { scene, name } => {
                    info!(scene, signal = %name, "宿主信号");
                    self.summary.signals.push(name);
                }
                DirectorEvent::Finished => {
                    self.summary.plays_completed += 1;
                    self.input.reset();
                }
                DirectorEvent::DialogueExhausted { .. }
                | DirectorEvent::Paused
                | DirectorEvent::Resumed
                | DirectorEvent::Restarted => {}
            }
        }
    }
}
