//! # Animation 模块
//!
//! 触发器驱动的动画引擎。
//!
//! ## 核心概念
//!
//! - [`AnimationTrait`]：单条动画规则，持有激活表达式、目标值与时间模型
//! - [`AnimatedObject`]：把可渲染对象绑定到一组有序的规则上
//! - [`Timing`]：固定时长或速度 + 加速度
//! - [`Frame`]：每帧采样一次的时间与视口
//!
//! ## 每帧流程
//!
//! ```text
//! TriggerSet ──► AnimationTrait::step ──► progress
//!                                           │
//!                          interpolate ◄────┘
//!                               │
//!                               ▼
//!                    Renderable setter（位置 / 颜色 / 尺寸）
//! ```

mod kind;
mod object;
mod rule;
mod timing;

pub use kind::{Target, TraitKind};
pub use object::{AnimatedObject, TraitReport};
pub use rule::{AnimationTrait, TraitState, TraitStep};
pub use timing::Timing;

use crate::clock::Millis;
use crate::renderable::Viewport;

/// 单帧上下文
///
/// 同一帧内所有对象共享同一个 `now`。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// 本帧采样的时间（毫秒）
    pub now: Millis,
    /// 当前视口
    pub viewport: Viewport,
}

impl Frame {
    /// 创建帧上下文
    pub fn new(now: Millis, viewport: Viewport) -> Self {
        Self { now, viewport }
    }
}
