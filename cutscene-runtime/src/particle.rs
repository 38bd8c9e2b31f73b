//! # Particle 模块
//!
//! 短生命周期的装饰性粒子（尘埃、火花、气焰余烬、碎石）。
//!
//! ## 更新规则
//!
//! - 位移按帧积分：`x += vx`、`y += vy`，**不乘以 dt**，保持原有的视觉节奏
//! - 生命值按种类的衰减率逐帧递减，`remaining_life <= 0` 时移除
//! - 移除采用压缩方式：一次遍历把存活粒子移入备用缓冲区再交换，
//!   存活粒子保持相对顺序（影响绘制层级）

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// 生命值判定容差，吸收 `1 - k * decay` 的舍入误差
const LIFE_EPSILON: f64 = 1e-9;

/// 粒子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// 缓慢上浮的尘埃
    Dust,
    /// 机械损伤迸出的火花
    Spark,
    /// 气焰余烬
    Ember,
    /// 爆炸碎石
    Debris,
}

/// 粒子种类的初速度分布与衰减率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleProfile {
    /// 每帧生命衰减
    pub decay: f64,
    pub vx: (f64, f64),
    pub vy: (f64, f64),
}

impl ParticleKind {
    pub fn profile(&self) -> ParticleProfile {
        match self {
            ParticleKind::Dust => ParticleProfile {
                decay: 1.0 / 150.0,
                vx: (-0.25, 0.25),
                vy: (-0.5, 0.0),
            },
            ParticleKind::Spark => ParticleProfile {
                decay: 0.05,
                vx: (-3.0, 3.0),
                vy: (-3.0, 1.0),
            },
            ParticleKind::Ember => ParticleProfile {
                decay: 0.02,
                vx: (-0.5, 0.5),
                vy: (-1.5, -0.5),
            },
            ParticleKind::Debris => ParticleProfile {
                decay: 0.03,
                vx: (-4.0, 4.0),
                vy: (-6.0, -2.0),
            },
        }
    }
}

/// 粒子句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleHandle(pub u64);

/// 单个粒子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub handle: ParticleHandle,
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// 剩余生命（1.0 → 0.0）
    pub remaining_life: f64,
    pub decay: f64,
    /// 已经历的更新次数
    pub age_ticks: u32,
}

impl Particle {
    /// 推进一帧，返回是否存活
    fn step(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.age_ticks = self.age_ticks.saturating_add(1);
        // 由帧数推导生命值，避免逐帧减法的误差累积
        self.remaining_life = 1.0 - self.decay * f64::from(self.age_ticks);
        if self.remaining_life <= LIFE_EPSILON {
            self.remaining_life = 0.0;
            return false;
        }
        true
    }
}

/// 粒子池
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    scratch: Vec<Particle>,
    capacity: usize,
    next_handle: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            scratch: Vec::new(),
            capacity,
            next_handle: 0,
        }
    }

    /// 按种类的速度分布生成粒子
    ///
    /// 池满时返回 `None`。
    pub fn spawn(
        &mut self,
        kind: ParticleKind,
        x: f64,
        y: f64,
        rng: &mut StdRng,
    ) -> Option<ParticleHandle> {
        let profile = kind.profile();
        let vx = sample(rng, profile.vx);
        let vy = sample(rng, profile.vy);
        self.spawn_with_velocity(kind, x, y, vx, vy)
    }

    /// 以指定初速度生成粒子
    pub fn spawn_with_velocity(
        &mut self,
        kind: ParticleKind,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
    ) -> Option<ParticleHandle> {
        if self.particles.len() >= self.capacity {
            return None;
        }

        let handle = ParticleHandle(self.next_handle);
        self.next_handle += 1;
        self.particles.push(Particle {
            handle,
            kind,
            x,
            y,
            vx,
            vy,
            remaining_life: 1.0,
            decay: kind.profile().decay,
            age_ticks: 0,
        });
        Some(handle)
    }

    /// 推进所有粒子并移除死亡粒子
    ///
    /// `_dt_ms` 仅用于保持与其他子系统一致的调用形式；积分按帧进行。
    pub fn update(&mut self, _dt_ms: f64) {
        self.scratch.clear();
        for mut particle in self.particles.drain(..) {
            if particle.step() {
                self.scratch.push(particle);
            }
        }
        std::mem::swap(&mut self.particles, &mut self.scratch);
    }

    /// 清空所有粒子
    pub fn clear(&mut self) {
        self.particles.clear();
        self.scratch.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn sample(rng: &mut StdRng, (low, high): (f64, f64)) -> f64 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
