//! # Clock 模块
//!
//! 帧时钟：每帧调用一次 `tick()`，返回距上一帧的毫秒数。
//!
//! - 单调、非负：时间源回退时返回 0
//! - 构造或 `reset()` 之后的第一次 `tick()` 返回 0（此时没有可用的间隔）

use std::time::Instant;

/// 时间源
pub trait TimeSource {
    /// 当前时间（毫秒，起点任意）
    fn now_ms(&mut self) -> f64;
}

/// 基于 `Instant` 的真实时间源
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// 手动推进的时间源（无头运行与测试使用）
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now_ms: f64,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进指定毫秒
    pub fn advance(&mut self, ms: f64) {
        if ms.is_finite() && ms > 0.0 {
            self.now_ms += ms;
        }
    }

    /// 直接设置当前时间
    pub fn set(&mut self, ms: f64) {
        self.now_ms = ms;
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&mut self) -> f64 {
        self.now_ms
    }
}

/// FPS 统计窗口（毫秒）
const FPS_WINDOW_MS: f64 = 1000.0;

/// 帧时钟
#[derive(Debug, Clone)]
pub struct Clock<S: TimeSource = MonotonicTime> {
    source: S,
    last_ms: Option<f64>,
    elapsed_ms: f64,
    window_ms: f64,
    window_frames: u32,
    fps: f64,
}

impl<S: TimeSource> Clock<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last_ms: None,
            elapsed_ms: 0.0,
            window_ms: 0.0,
            window_frames: 0,
            fps: 0.0,
        }
    }

    /// 采样时间源，返回本帧间隔（毫秒）
    pub fn tick(&mut self) -> f64 {
        let now = self.source.now_ms();
        let dt = match self.last_ms {
            None => 0.0,
            Some(last) if now.is_finite() && now > last => now - last,
            Some(_) => 0.0,
        };

        if now.is_finite() {
            self.last_ms = Some(self.last_ms.map_or(now, |last| last.max(now)));
        }
        self.elapsed_ms += dt;
        self.sample_fps(dt);
        dt
    }

    fn sample_fps(&mut self, dt: f64) {
        self.window_ms += dt;
        self.window_frames += 1;
        if self.window_ms >= FPS_WINDOW_MS {
            self.fps = f64::from(self.window_frames) * 1000.0 / self.window_ms;
            self.window_ms = 0.0;
            self.window_frames = 0;
        }
    }

    /// 丢弃上一帧时间戳，下一次 `tick()` 返回 0
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.elapsed_ms = 0.0;
        self.window_ms = 0.0;
        self.window_frames = 0;
        self.fps = 0.0;
    }

    /// 累计经过的时间（毫秒）
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// 最近一个统计窗口的帧率
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl Default for Clock<MonotonicTime> {
    fn default() -> Self {
        Self::new(MonotonicTime::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = Clock::new(ManualTime::new());
        clock.source_mut().set(500.0);
        assert_eq!(clock.tick(), 0.0);

        clock.source_mut().advance(16.0);
        assert_eq!(clock.tick(), 16.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
    }

    #[test]
    fn test_backwards_time_yields_zero() {
        let mut clock = Clock::new(ManualTime::new());
        clock.source_mut().set(100.0);
        clock.tick();

        clock.source_mut().set(40.0);
        assert_eq!(clock.tick(), 0.0);

        // 回退之后以最大时间戳为基准
        clock.source_mut().set(120.0);
        assert_eq!(clock.tick(), 20.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::new(ManualTime::new());
        clock.tick();
        clock.source_mut().advance(30.0);
        clock.tick();

        clock.reset();
        clock.source_mut().advance(30.0);
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_fps_window() {
        let mut clock = Clock::new(ManualTime::new());
        clock.tick();
        for _ in 0..50 {
            clock.source_mut().advance(20.0);
            clock.tick();
        }
        // 50 帧 × 20ms = 1000ms，加上首帧共 51 帧
        assert!((clock.fps() - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_monotonic_source_never_negative() {
        let mut clock = Clock::default();
        clock.tick();
        assert!(clock.tick() >= 0.0);
    }
}
