//! # Error 模块
//!
//! 定义 cutscene-runtime 中使用的错误类型。
//!
//! 运行中的 Director 不产生错误：越界跳转是定义好的终止转换，
//! 非法时机的输入被静默忽略。错误只出现在启动阶段的数据校验中。

use thiserror::Error;

/// 分镜数据错误
///
/// 在构造 [`Storyboard`](crate::scene::Storyboard) 时一次性检查，
/// 不会在播放过程中出现。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryboardError {
    /// 场景列表为空
    #[error("分镜至少需要一个场景")]
    Empty,

    /// 自动计时场景的时长无效
    #[error("场景 {scene}（{title}）：自动计时时长必须为正数，实际为 {duration_ms}")]
    InvalidDuration {
        scene: usize,
        title: String,
        duration_ms: f64,
    },

    /// 镜头参数无效
    #[error("场景 {scene}（{title}）：镜头参数无效 - {message}")]
    InvalidCamera {
        scene: usize,
        title: String,
        message: String,
    },

    /// 粒子发射率越界
    #[error("场景 {scene}（{title}）：第 {emitter} 个发射器的发射率 {rate} 不在 0..=1 内")]
    InvalidEmissionRate {
        scene: usize,
        title: String,
        emitter: usize,
        rate: f64,
    },

    /// 时间参数无效（cue 偏移、台词停留时长）
    #[error("场景 {scene}（{title}）：{field} 必须为非负有限数，实际为 {value}")]
    InvalidTiming {
        scene: usize,
        title: String,
        field: String,
        value: f64,
    },

    /// 台词门控场景没有台词
    #[error("场景 {scene}（{title}）：DialogueGated 场景必须包含台词")]
    GatedWithoutDialogue { scene: usize, title: String },
}

/// Director 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 字段值无效
    #[error("配置项 '{field}' 无效: {message}")]
    InvalidField { field: String, message: String },
}

/// cutscene-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutsceneError {
    /// 分镜数据错误
    #[error("分镜错误: {0}")]
    Storyboard(#[from] StoryboardError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type CutsceneResult<T> = Result<T, CutsceneError>;
