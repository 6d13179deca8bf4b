//! # Geometry 模块
//!
//! 二维几何类型与极坐标投影。
//!
//! 位置动画不是逐轴线性插值，而是：
//! 1. 计算起点到终点的直线距离 `d` 与方位角 `θ`
//! 2. 从起点沿 `θ` 方向前进 `d·p`

use serde::{Deserialize, Serialize};

/// 二维点（像素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// 创建新的点
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 吸附到整数像素
    pub fn snapped(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 二维尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// 创建新的尺寸
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 位姿：左上角坐标与尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Pose {
    /// 创建新的位姿
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 左上角
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// 尺寸
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// 位置动画目标
///
/// 为 `None` 的分量沿用起点的对应分量，只动画单轴。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationTarget {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl LocationTarget {
    /// 创建新的位置目标
    pub const fn new(x: Option<f32>, y: Option<f32>) -> Self {
        Self { x, y }
    }

    /// 只动画 x 轴
    pub const fn x(x: f32) -> Self {
        Self::new(Some(x), None)
    }

    /// 只动画 y 轴
    pub const fn y(y: f32) -> Self {
        Self::new(None, Some(y))
    }

    /// 用起点补全缺失分量
    pub fn resolve(&self, from: Point) -> Point {
        Point::new(self.x.unwrap_or(from.x), self.y.unwrap_or(from.y))
    }
}

/// 两点之间的欧氏距离
pub fn distance(a: Point, b: Point) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// 从 `from` 指向 `to` 的方位角（度，相对 x 轴）
pub fn bearing(from: Point, to: Point) -> f32 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// 从 `from` 沿方位角 `degrees` 前进 `dist` 得到的点
pub fn project(from: Point, dist: f32, degrees: f32) -> Point {
    let radians = degrees.to_radians();
    Point::new(from.x + dist * radians.cos(), from.y + dist * radians.sin())
}

/// 沿直线从 `from` 向 `to` 前进 `progress` 比例
///
/// 距离为 0 时方位角无定义，直接返回 `from`。
pub fn locate(from: Point, to: Point, progress: f32) -> Point {
    let dist = distance(from, to);
    if dist == 0.0 {
        return from;
    }
    project(from, dist * progress, bearing(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn test_distance_and_bearing() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(distance(a, Point::new(3.0, 4.0)), 5.0);
        assert_eq!(bearing(a, Point::new(10.0, 0.0)), 0.0);
        assert!((bearing(a, Point::new(0.0, 10.0)) - 90.0).abs() < 1e-4);
        assert!((bearing(a, Point::new(-10.0, 0.0)).abs() - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_locate_endpoints() {
        let from = Point::new(20.0, 108.0);
        let to = Point::new(300.0, 500.0);
        assert_eq!(locate(from, to, 0.0), from);
        assert!(approx(locate(from, to, 1.0), to));
        assert!(approx(
            locate(from, to, 0.5),
            Point::new(160.0, 304.0)
        ));
    }

    #[test]
    fn test_locate_zero_distance() {
        let p = Point::new(5.0, 5.0);
        let result = locate(p, p, 0.7);
        assert_eq!(result, p);
        assert!(!result.x.is_nan());
    }

    #[test]
    fn test_locate_monotonic() {
        let from = Point::new(-100.0, 40.0);
        let to = Point::new(900.0, -260.0);
        let mut last = 0.0;
        for step in 0..=20 {
            let p = step as f32 / 20.0;
            let d = distance(from, locate(from, to, p));
            assert!(d >= last);
            last = d;
        }
    }

    #[test]
    fn test_location_target_resolve() {
        let from = Point::new(12.0, 34.0);
        assert_eq!(LocationTarget::x(100.0).resolve(from), Point::new(100.0, 34.0));
        assert_eq!(LocationTarget::y(7.0).resolve(from), Point::new(12.0, 7.0));
        assert_eq!(LocationTarget::default().resolve(from), from);
    }

    #[test]
    fn test_snapped() {
        assert_eq!(Point::new(99.9999, 0.49).snapped(), Point::new(100.0, 0.0));
    }
}
