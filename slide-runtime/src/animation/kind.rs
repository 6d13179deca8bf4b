//! # Kind 模块
//!
//! 动画属性类型与目标值。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interpolate::{LocationTarget, Rgba, Size, SizeValue};

/// 动画属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitKind {
    /// 位置
    Location,
    /// 颜色
    Color,
    /// 尺寸
    Size,
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Location => "location",
            Self::Color => "color",
            Self::Size => "size",
        };
        write!(f, "{name}")
    }
}

/// 动画目标值
///
/// 目标值的形状决定属性类型，保证两者不会不一致。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// 位置目标（像素，可只指定单轴）
    Location(LocationTarget),
    /// 颜色目标
    Color(Rgba),
    /// 尺寸目标（字号或像素尺寸）
    Size(SizeValue),
}

impl Target {
    /// 只移动 x 轴
    pub fn move_x(x: f32) -> Self {
        Self::Location(LocationTarget::x(x))
    }

    /// 只移动 y 轴
    pub fn move_y(y: f32) -> Self {
        Self::Location(LocationTarget::y(y))
    }

    /// 移动到指定点
    pub fn move_to(x: f32, y: f32) -> Self {
        Self::Location(LocationTarget::new(Some(x), Some(y)))
    }

    /// 颜色变化
    pub fn color(color: Rgba) -> Self {
        Self::Color(color)
    }

    /// 字号变化
    pub fn font_size(size: f32) -> Self {
        Self::Size(SizeValue::Scalar(size))
    }

    /// 像素尺寸变化
    pub fn resize(width: f32, height: f32) -> Self {
        Self::Size(SizeValue::Pair(Size::new(width, height)))
    }

    /// 属性类型
    pub fn kind(&self) -> TraitKind {
        match self {
            Self::Location(_) => TraitKind::Location,
            Self::Color(_) => TraitKind::Color,
            Self::Size(_) => TraitKind::Size,
        }
    }
}
