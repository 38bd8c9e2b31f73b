//! # Camera 模块
//!
//! 镜头机位：平移、缩放与抖动。
//!
//! ## 更新模型
//!
//! ```text
//! begin(from)                 记录插值起点
//! set_target(to, progress)    x / y / zoom 各自从起点插值到目标
//! tick(dt)                    抖动计时递减，生成随机偏移
//! ```
//!
//! 基础机位与抖动偏移分开保存，抖动不会累积到插值结果中。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// zoom 下限，保证 `zoom > 0`
pub const MIN_ZOOM: f64 = 0.01;

/// 镜头机位
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl CameraPose {
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// 线性插值，`t` 不做限制
    pub fn lerp(&self, to: &CameraPose, t: f64) -> CameraPose {
        CameraPose {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
            zoom: self.zoom + (to.zoom - self.zoom) * t,
        }
    }

    /// 所有分量有限且 zoom 为正
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.zoom.is_finite() && self.zoom > 0.0
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// 抖动参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeSpec {
    /// 单轴最大偏移
    pub intensity: f64,
    /// 持续时间（毫秒）
    pub duration_ms: f64,
}

impl ShakeSpec {
    pub const fn new(intensity: f64, duration_ms: f64) -> Self {
        Self {
            intensity,
            duration_ms,
        }
    }
}

/// 镜头状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
    pub shake_intensity: f64,
    pub shake_remaining_ms: f64,
    /// 本帧抖动偏移
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CameraState {
    fn at(pose: CameraPose) -> Self {
        Self {
            x: pose.x,
            y: pose.y,
            zoom: pose.zoom.max(MIN_ZOOM),
            shake_intensity: 0.0,
            shake_remaining_ms: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// 不含抖动的基础机位
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.x, self.y, self.zoom)
    }

    /// 含抖动偏移的 x
    pub fn view_x(&self) -> f64 {
        self.x + self.offset_x
    }

    /// 含抖动偏移的 y
    pub fn view_y(&self) -> f64 {
        self.y + self.offset_y
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_remaining_ms > 0.0
    }
}

/// 镜头机位控制器
#[derive(Debug, Clone)]
pub struct CameraRig {
    state: CameraState,
    from: CameraPose,
    easing: Easing,
    rng: StdRng,
}

impl CameraRig {
    pub fn new(seed: u64) -> Self {
        Self::with_pose(CameraPose::default(), seed)
    }

    pub fn with_pose(pose: CameraPose, seed: u64) -> Self {
        Self {
            state: CameraState::at(pose),
            from: pose,
            easing: Easing::Linear,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 开始新一段镜头移动
    ///
    /// 基础机位立即跳到 `from`，正在进行的抖动保留。
    pub fn begin(&mut self, from: CameraPose, easing: Easing) {
        self.from = from;
        self.easing = easing;
        self.state.x = from.x;
        self.state.y = from.y;
        self.state.zoom = from.zoom.max(MIN_ZOOM);
    }

    /// 按进度插值到目标机位
    ///
    /// `progress` 限制在 0.0 - 1.0；`progress >= 1` 时机位严格等于 `target`。
    pub fn set_target(&mut self, target: CameraPose, progress: f64) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        let pose = if progress >= 1.0 {
            target
        } else {
            self.from.lerp(&target, self.easing.apply(progress))
        };

        self.state.x = pose.x;
        self.state.y = pose.y;
        self.state.zoom = pose.zoom.max(MIN_ZOOM);
    }

    /// 开始抖动，覆盖正在进行的抖动
    pub fn apply_shake(&mut self, intensity: f64, duration_ms: f64) {
        self.state.shake_intensity = non_negative(intensity);
        self.state.shake_remaining_ms = non_negative(duration_ms);
        if self.state.shake_remaining_ms == 0.0 {
            self.stop_shake();
        }
    }

    /// 推进抖动
    pub fn tick(&mut self, dt_ms: f64) {
        if !self.state.is_shaking() {
            return;
        }

        self.state.shake_remaining_ms -= non_negative(dt_ms);
        if self.state.shake_remaining_ms <= 0.0 {
            self.stop_shake();
            return;
        }

        let intensity = self.state.shake_intensity;
        if intensity > 0.0 {
            // 先在单位区间采样再缩放，极大强度也不会让区间溢出
            let ux: f64 = self.rng.gen_range(-1.0..=1.0);
            let uy: f64 = self.rng.gen_range(-1.0..=1.0);
            self.state.offset_x = ux * intensity;
            self.state.offset_y = uy * intensity;
        }
    }

    fn stop_shake(&mut self) {
        self.state.shake_remaining_ms = 0.0;
        self.state.shake_intensity = 0.0;
        self.state.offset_x = 0.0;
        self.state.offset_y = 0.0;
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn pose(&self) -> CameraPose {
        self.state.pose()
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
