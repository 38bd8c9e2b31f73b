//! # Input 模块
//!
//! 宿主向 Director 传递的语义化输入。
//!
//! Director 不处理鼠标/键盘事件；宿主的输入适配层把原始事件映射为
//! `DirectorInput`，去抖等策略也在宿主侧完成。

use serde::{Deserialize, Serialize};

/// 宿主向 Director 传递的输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectorInput {
    /// 主要交互（点击 / 轻触 / 空格）：推进台词或场景
    Advance,
    /// 从第一个场景重新播放
    Restart,
    /// 切换暂停
    TogglePause,
}
