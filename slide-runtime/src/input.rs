//! # Input 模块
//!
//! 定义驱动方向放映状态传递的输入事件。
//!
//! ## 设计说明
//!
//! - `SlideInput` 是驱动方采集用户操作后传入的抽象输入
//! - 放映状态不直接处理鼠标/键盘事件，只处理语义化的输入
//! - 时间流逝通过 [`SlideShow::frame`](crate::show::SlideShow::frame) 的 `now` 参数传入

use serde::{Deserialize, Serialize};

/// 驱动方传入的输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SlideInput {
    /// 鼠标点击：触发下一个点击事件，超出所需点击数时翻页
    Click,

    /// 按键：直接翻页
    Advance,

    /// 退出放映
    Quit,

    /// 窗口尺寸变化
    Resize { width: f32, height: f32 },
}

impl SlideInput {
    /// 创建尺寸变化输入
    pub fn resize(width: f32, height: f32) -> Self {
        Self::Resize { width, height }
    }
}
