//! # Interpolate 模块
//!
//! 动画使用的纯函数插值库。
//!
//! - [`lerp`]：标量线性插值
//! - [`SizeValue::lerp`]：标量或逐轴尺寸插值
//! - [`color::lerp_color`]：HSL 空间颜色插值
//! - [`geometry::locate`]：沿直线的极坐标投影

pub mod color;
pub mod geometry;

pub use color::{Hsl, Rgba, lerp_color};
pub use geometry::{LocationTarget, Point, Pose, Size, bearing, distance, locate, project};

/// 标量线性插值
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// 尺寸值
///
/// 文本使用标量（字号），图片使用二维像素尺寸。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeValue {
    /// 标量尺寸（如字号）
    Scalar(f32),
    /// 二维尺寸
    Pair(Size),
}

impl SizeValue {
    /// 线性插值，结果截断为整数
    ///
    /// 形状不一致时，标量会广播到两个轴上；
    /// 以起点的形状为准，保证写回对象的值形状不变。
    pub fn lerp(self, to: SizeValue, t: f32) -> SizeValue {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(lerp(a, b, t).trunc()),
            (Self::Scalar(a), Self::Pair(b)) => Self::Scalar(lerp(a, b.width, t).trunc()),
            (Self::Pair(a), to) => {
                let b = to.as_pair();
                Self::Pair(Size::new(
                    lerp(a.width, b.width, t).trunc(),
                    lerp(a.height, b.height, t).trunc(),
                ))
            }
        }
    }

    /// 转换为二维尺寸
    pub fn as_pair(self) -> Size {
        match self {
            Self::Scalar(v) => Size::new(v, v),
            Self::Pair(size) => size,
        }
    }

    /// 转换为标量（二维尺寸取宽度）
    pub fn as_scalar(self) -> f32 {
        match self {
            Self::Scalar(v) => v,
            Self::Pair(size) => size.width,
        }
    }
}
