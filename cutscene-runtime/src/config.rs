//! # Config 模块
//!
//! Director 的运行参数。所有字段都有默认值，宿主可以只覆盖关心的部分。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Director 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// 随机数种子（镜头抖动、粒子发射共用）
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// 非自动计时场景的镜头推进窗口（毫秒）
    ///
    /// `AutoTimed` 场景按场景时长推进镜头，其余场景在此窗口内完成镜头移动。
    #[serde(default = "default_camera_ramp_ms")]
    pub camera_ramp_ms: f64,

    /// 粒子池容量上限
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,

    /// 台词回看记录上限
    #[serde(default = "default_backlog_capacity")]
    pub backlog_capacity: usize,
}

fn default_seed() -> u64 {
    0x5eed_c0de
}

fn default_camera_ramp_ms() -> f64 {
    1500.0
}

fn default_max_particles() -> usize {
    2048
}

fn default_backlog_capacity() -> usize {
    200
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            camera_ramp_ms: default_camera_ramp_ms(),
            max_particles: default_max_particles(),
            backlog_capacity: default_backlog_capacity(),
        }
    }
}

impl DirectorConfig {
    /// 使用指定种子创建配置
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.camera_ramp_ms.is_finite() || self.camera_ramp_ms <= 0.0 {
            return Err(ConfigError::InvalidField {
                field: "camera_ramp_ms".to_string(),
                message: format!("必须为正数，实际为 {}", self.camera_ramp_ms),
            });
        }

        if self.max_particles == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_particles".to_string(),
                message: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }
}
