//! # Image 模块
//!
//! 图片渲染对象。
//!
//! 图片用两个归一化锚点（左上、右下）描述矩形。尺寸动画期间写入临时覆盖锚点，
//! 只有在动画完成时才提交到正式锚点：
//!
//! ```text
//! committed: Pins          正式值
//! pending:   Option<Pins>  临时覆盖，渲染时优先使用
//! ```

use serde::{Deserialize, Serialize};

use crate::interpolate::{Point, Pose, Rgba, SizeValue};

use super::{Colorable, Positionable, Renderable, Resizable, Viewport};

/// 归一化锚点 `[x0, y0, x1, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Pins {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Pins {
    /// 创建锚点
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// 转换为像素矩形（吸附到整数像素）
    pub fn to_pose(&self, viewport: Viewport) -> Pose {
        Pose::new(
            (self.x0 * viewport.width).round(),
            (self.y0 * viewport.height).round(),
            ((self.x1 - self.x0) * viewport.width).abs().round(),
            ((self.y1 - self.y0) * viewport.height).abs().round(),
        )
    }

    /// 平移使左上角位于 `to`（归一化），保持宽高
    fn moved_to(self, to: Point) -> Self {
        let dx = to.x - self.x0;
        let dy = to.y - self.y0;
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

impl From<[f32; 4]> for Pins {
    fn from([x0, y0, x1, y1]: [f32; 4]) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}

impl From<Pins> for [f32; 4] {
    fn from(p: Pins) -> Self {
        [p.x0, p.y0, p.x1, p.y1]
    }
}

/// 图片
///
/// 图片的解码与缩放由宿主负责，这里只保存路径与几何状态。
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    path: String,
    committed: Pins,
    pending: Option<Pins>,
    tint: Rgba,
    pending_tint: Option<Rgba>,
}

impl ImageItem {
    /// 创建图片
    pub fn new(path: impl Into<String>, pins: Pins) -> Self {
        Self {
            path: path.into(),
            committed: pins,
            pending: None,
            tint: Rgba::WHITE,
            pending_tint: None,
        }
    }

    /// 图片路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 正式锚点
    pub fn pins(&self) -> Pins {
        self.committed
    }

    /// 临时覆盖锚点
    pub fn pending_pins(&self) -> Option<Pins> {
        self.pending
    }

    /// 渲染使用的锚点（优先临时覆盖）
    pub fn effective_pins(&self) -> Pins {
        self.pending.unwrap_or(self.committed)
    }

    /// 渲染使用的着色
    pub fn tint(&self) -> Rgba {
        self.pending_tint.unwrap_or(self.tint)
    }
}

impl Positionable for ImageItem {
    fn position(&self, viewport: Viewport) -> Pose {
        self.effective_pins().to_pose(viewport)
    }

    fn set_position(&mut self, point: Point, viewport: Viewport) {
        let to = viewport.normalize(point);
        self.committed = self.committed.moved_to(to);
        self.pending = self.pending.map(|pins| pins.moved_to(to));
    }
}

impl Resizable for ImageItem {
    fn size(&self, viewport: Viewport) -> SizeValue {
        SizeValue::Pair(self.position(viewport).size())
    }

    fn resize(&mut self, size: SizeValue, permanent: bool, viewport: Viewport) {
        let size = size.as_pair();
        let rect = self.committed.to_pose(viewport);
        let resized = Pins {
            x1: (rect.x + size.width) / viewport.width,
            y1: (rect.y + size.height) / viewport.height,
            ..self.committed
        };

        if permanent {
            self.committed = resized;
            self.pending = None;
        } else {
            self.pending = Some(resized);
        }
    }
}

impl Colorable for ImageItem {
    fn color(&self) -> Rgba {
        self.tint
    }

    fn set_color(&mut self, color: Rgba, permanent: bool) {
        if permanent {
            self.tint = color;
            self.pending_tint = None;
        } else {
            self.pending_tint = Some(color);
        }
    }
}

impl Renderable for ImageItem {
    fn label(&self) -> String {
        format!("image({})", self.path)
    }
}
