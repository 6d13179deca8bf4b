//! # Slide Runtime
//!
//! 触发器驱动的幻灯片动画引擎核心库。
//!
//! ## 架构概述
//!
//! `slide-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 幻灯片中的元素（文本框、图片）在离散触发器（幻灯片开始、点击、其它动画完成）
//! 的驱动下，在位置、颜色、尺寸之间做基于时间的插值：
//!
//! ```text
//! Driver                         Runtime
//!   │                               │
//!   │──── SlideInput ─────────────►│ handle_input()
//!   │──── now ────────────────────►│ frame()
//!   │                               │   TriggerSet ─► AnimationTrait ─► interpolate
//!   │◄─── items() ─────────────────│   写回 Renderable
//!   │                               │
//! ```
//!
//! ## 核心类型
//!
//! - [`Trigger`] / [`TriggerExpr`]：触发器令牌与激活表达式
//! - [`TriggerSet`]：幻灯片作用域内的活跃令牌集合
//! - [`AnimationTrait`]：单条动画规则及其状态机
//! - [`AnimatedObject`]：绑定渲染对象与规则列表
//! - [`SlideShow`]：当前页、点击计数与翻页决策
//!
//! ## 使用示例
//!
//! ```ignore
//! use slide_runtime::{DeckDef, SlideShow, SlideInput, SystemClock, Clock, Viewport};
//!
//! let deck = DeckDef::from_json(&text)?;
//! let mut show = SlideShow::from_deck(&deck, Viewport::default())?;
//! let clock = SystemClock::new();
//!
//! while !show.is_finished() {
//!     for input in poll_inputs() {
//!         show.handle_input(input);
//!     }
//!     show.frame(clock.now());
//!     for item in show.items() {
//!         host.draw(&*item.borrow());
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`trigger`] / [`trigger_set`]：触发器
//! - [`animation`]：动画规则与可动画对象
//! - [`interpolate`]：插值函数库
//! - [`renderable`]：渲染对象能力接口与内置对象
//! - [`definition`]：幻灯片定义（serde）
//! - [`show`]：放映状态
//! - [`clock`]：时钟
//! - [`input`]：输入事件
//! - [`error`]：错误类型定义

pub mod animation;
pub mod clock;
pub mod definition;
pub mod error;
pub mod input;
pub mod interpolate;
pub mod renderable;
pub mod show;
pub mod trigger;
pub mod trigger_set;

// 重导出核心类型
pub use animation::{
    AnimatedObject, AnimationTrait, Frame, Target, Timing, TraitKind, TraitReport, TraitState,
    TraitStep,
};
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use definition::{DeckDef, ItemDef, ObjectDef, SlideDef, SpanDef, TargetDef, TraitDef};
pub use error::{ConfigError, DeckError, SlideError, SlideResult};
pub use input::SlideInput;
pub use interpolate::{Hsl, LocationTarget, Point, Pose, Rgba, Size, SizeValue};
pub use renderable::{
    Colorable, FontBook, FontStyle, ImageItem, ItemHandle, Pins, Positionable, Renderable,
    Resizable, TextBox, TextSpan, Viewport, share,
};
pub use show::{FrameReport, ShowEvent, Slide, SlideShow};
pub use trigger::{SelfMarker, Trigger, TriggerExpr};
pub use trigger_set::TriggerSet;
