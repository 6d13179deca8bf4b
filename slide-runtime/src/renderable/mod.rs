//! # Renderable 模块
//!
//! 动画引擎消费的渲染对象能力接口。
//!
//! ## 核心设计理念
//!
//! 引擎只按动画类型分发，**不判断具体对象类型**：
//! - [`Positionable`]：位置读写
//! - [`Resizable`]：尺寸读写，以及尺寸插值的基准
//! - [`Colorable`]：颜色读写
//!
//! 唯一的类型相关规则（文本取"活动字体"的字号作为基准）
//! 由 [`Resizable::resolve_size_baseline`] 在文本框上重写实现。
//!
//! 位置以视口宽高归一化的 `[0, 1]` 坐标保存，窗口缩放后仍然有效；
//! 接口上的读写使用像素坐标，由调用方传入当前 [`Viewport`]。

mod image;
mod text;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::interpolate::{Point, Pose, Rgba, SizeValue};

pub use image::{ImageItem, Pins};
pub use text::{FontBook, FontStyle, TextBox, TextSpan};

/// 视口尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// 创建视口
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// 宽高均为正的有限值
    pub fn is_drawable(&self) -> bool {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        valid(self.width) && valid(self.height)
    }

    /// 像素坐标转换为归一化坐标
    ///
    /// 无效的轴（零宽、零高或非有限值）归一化为 0。
    pub fn normalize(&self, point: Point) -> Point {
        Point::new(ratio(point.x, self.width), ratio(point.y, self.height))
    }

    /// 归一化坐标转换为像素坐标
    pub fn denormalize(&self, point: Point) -> Point {
        Point::new(point.x * self.width, point.y * self.height)
    }
}

fn ratio(value: f32, extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        value / extent
    } else {
        0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// 位置能力
pub trait Positionable {
    /// 当前位姿（像素，取整）
    fn position(&self, viewport: Viewport) -> Pose;

    /// 移动左上角到 `point`（像素），保持当前尺寸
    fn set_position(&mut self, point: Point, viewport: Viewport);
}

/// 尺寸能力
pub trait Resizable {
    /// 当前尺寸
    fn size(&self, viewport: Viewport) -> SizeValue;

    /// 修改尺寸
    ///
    /// `permanent` 为 `false` 时只写入临时覆盖值，渲染优先使用覆盖值；
    /// 为 `true` 时提交到正式值并清除覆盖。
    fn resize(&mut self, size: SizeValue, permanent: bool, viewport: Viewport);

    /// 尺寸插值的基准值
    ///
    /// 默认使用起点位姿的宽高。
    fn resolve_size_baseline(&self, origin: &Pose) -> SizeValue {
        SizeValue::Pair(origin.size())
    }
}

/// 颜色能力
pub trait Colorable {
    /// 已提交的颜色（不含临时覆盖）
    fn color(&self) -> Rgba;

    /// 修改颜色，`permanent` 语义同 [`Resizable::resize`]
    fn set_color(&mut self, color: Rgba, permanent: bool);
}

/// 可渲染对象
pub trait Renderable: Positionable + Resizable + Colorable {
    /// 用于日志的简短描述
    fn label(&self) -> String;
}

/// 渲染对象共享句柄
///
/// 动画对象与驱动方（渲染循环）同时持有，使用 `Rc<RefCell<_>>` 实现内部可变性。
pub type ItemHandle = Rc<RefCell<dyn Renderable>>;

/// 包装渲染对象为共享句柄
///
/// 返回具体类型的句柄；传给 [`AnimatedObject`](crate::animation::AnimatedObject)
/// 时会自动转换为 [`ItemHandle`]，调用方仍可通过原句柄读取具体状态。
pub fn share<R: Renderable + 'static>(item: R) -> Rc<RefCell<R>> {
    Rc::new(RefCell::new(item))
}
