//! # Color 模块
//!
//! RGB(A) 颜色与 HSL 色彩空间转换。
//!
//! 颜色动画在 HSL 空间中逐通道线性插值，再转换回 RGB；
//! alpha 不参与插值，直接沿用起点颜色的值。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::lerp;

/// RGBA 颜色
///
/// 各分量范围 0.0 - 255.0；保留浮点精度，避免动画过程中累积取整误差。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// 不透明白色
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);

    /// 创建不透明颜色
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 255.0 }
    }

    /// 创建带透明度的颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 转换为 8 位分量（四舍五入并截断到 0-255）
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// 转换到 HSL（忽略 alpha）
    pub fn to_hsl(self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };

        Hsl { h, s, l }
    }

    /// 从 HSL 构造颜色，alpha 由调用方提供
    pub fn from_hsl(hsl: Hsl, alpha: f32) -> Self {
        let Hsl { h, s, l } = hsl;
        if s == 0.0 {
            let v = l * 255.0;
            return Self::rgba(v, v, v, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgba(
            hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_rgb(p, q, h) * 255.0,
            hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0,
            alpha,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<Vec<f32>> for Rgba {
    type Error = ConfigError;

    fn try_from(value: Vec<f32>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
            _ => Err(ConfigError::InvalidColor { len: value.len() }),
        }
    }
}

impl From<Rgba> for Vec<f32> {
    fn from(c: Rgba) -> Self {
        vec![c.r, c.g, c.b, c.a]
    }
}

/// HSL 颜色，各分量范围 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// HSL 空间颜色插值
///
/// 三个通道各自独立插值（色相不走最短弧）；结果沿用 `from` 的 alpha。
pub fn lerp_color(from: Rgba, to: Rgba, progress: f32) -> Rgba {
    let a = from.to_hsl();
    let b = to.to_hsl();
    let mixed = Hsl {
        h: lerp(a.h, b.h, progress),
        s: lerp(a.s, b.s, progress),
        l: lerp(a.l, b.l, progress),
    };
    Rgba::from_hsl(mixed, from.a)
}
