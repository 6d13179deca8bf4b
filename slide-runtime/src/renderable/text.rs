//! # Text 模块
//!
//! 文本框渲染对象。
//!
//! 文本框由若干文本片段组成，每个片段有自己的字体样式，并声明自己参与哪些动画类型。
//! 颜色/尺寸动画只作用于声明了对应类型的片段；没有片段声明时作用于第一个片段。
//!
//! 字形排版不在这里处理：文本框的像素宽高只是按字号估算的包围盒。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animation::TraitKind;
use crate::error::ConfigError;
use crate::interpolate::{Point, Pose, Rgba, SizeValue};

use super::{Colorable, Positionable, Renderable, Resizable, Viewport};

/// 估算字宽与字号的比例
const GLYPH_WIDTH_RATIO: f32 = 0.5;
/// 估算行高与字号的比例
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// 字体样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    /// 字号
    pub size: f32,
    /// 颜色
    #[serde(default)]
    pub color: Rgba,
}

impl FontStyle {
    /// 创建字体样式
    pub const fn new(size: f32, color: Rgba) -> Self {
        Self { size, color }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::new(32.0, Rgba::WHITE)
    }
}

/// 命名字体样式表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontBook {
    styles: BTreeMap<String, FontStyle>,
}

impl FontBook {
    /// 默认样式名
    pub const DEFAULT: &'static str = "default";

    /// 创建空样式表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册样式
    pub fn insert(&mut self, name: impl Into<String>, style: FontStyle) {
        self.styles.insert(name.into(), style);
    }

    /// 按名称查找样式
    pub fn get(&self, name: &str) -> Option<&FontStyle> {
        self.styles.get(name)
    }

    /// 解析样式名
    ///
    /// 找不到时依次回退到 `default` 样式、第一个已注册样式、内置默认样式，
    /// 不会失败。
    pub fn resolve(&self, name: Option<&str>) -> (String, FontStyle) {
        if let Some(name) = name {
            if let Some(style) = self.styles.get(name) {
                return (name.to_string(), *style);
            }
            warn!(font = %name, "字体样式不存在，使用回退样式");
        }

        if let Some(style) = self.styles.get(Self::DEFAULT) {
            return (Self::DEFAULT.to_string(), *style);
        }
        if let Some((name, style)) = self.styles.iter().next() {
            return (name.clone(), *style);
        }
        (Self::DEFAULT.to_string(), FontStyle::default())
    }
}

impl FromIterator<(String, FontStyle)> for FontBook {
    fn from_iter<I: IntoIterator<Item = (String, FontStyle)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}

/// 文本片段
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    text: String,
    font: String,
    style: FontStyle,
    animations: Vec<TraitKind>,
    pending_size: Option<f32>,
    pending_color: Option<Rgba>,
}

impl TextSpan {
    /// 创建文本片段
    pub fn new(text: impl Into<String>, font: impl Into<String>, style: FontStyle) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            style,
            animations: Vec::new(),
            pending_size: None,
            pending_color: None,
        }
    }

    /// 声明参与的动画类型
    pub fn with_animations(mut self, animations: impl IntoIterator<Item = TraitKind>) -> Self {
        self.animations = animations.into_iter().collect();
        self
    }

    /// 文本内容
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 字体样式名
    pub fn font(&self) -> &str {
        &self.font
    }

    /// 已提交的样式
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// 渲染使用的字号（优先临时覆盖）
    pub fn size(&self) -> f32 {
        self.pending_size.unwrap_or(self.style.size)
    }

    /// 渲染使用的颜色（优先临时覆盖）
    pub fn color(&self) -> Rgba {
        self.pending_color.unwrap_or(self.style.color)
    }

    /// 是否声明参与某类动画
    pub fn animates(&self, kind: TraitKind) -> bool {
        self.animations.contains(&kind)
    }
}

/// 文本框
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// 左上角（归一化）
    anchor: Point,
    spans: Vec<TextSpan>,
}

impl TextBox {
    /// 创建文本框
    ///
    /// # 参数
    /// - `x`, `y`: 左上角归一化坐标
    /// - `spans`: 文本片段，至少一个
    pub fn new(x: f32, y: f32, spans: Vec<TextSpan>) -> Result<Self, ConfigError> {
        if spans.is_empty() {
            return Err(ConfigError::EmptyTextBox);
        }
        Ok(Self {
            anchor: Point::new(x, y),
            spans,
        })
    }

    /// 左上角归一化坐标
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// 所有片段
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    /// 拼接后的文本
    pub fn text(&self) -> String {
        self.spans.iter().map(TextSpan::text).collect()
    }

    /// 活动片段索引：第一个声明了 `kind` 的片段，否则第一个片段
    fn active_index(&self, kind: TraitKind) -> usize {
        self.spans
            .iter()
            .position(|span| span.animates(kind))
            .unwrap_or(0)
    }

    /// 某类动画作用的片段
    fn targets_mut(&mut self, kind: TraitKind) -> impl Iterator<Item = &mut TextSpan> {
        let any = self.spans.iter().any(|span| span.animates(kind));
        self.spans
            .iter_mut()
            .enumerate()
            .filter(move |(i, span)| if any { span.animates(kind) } else { *i == 0 })
            .map(|(_, span)| span)
    }

    /// 估算包围盒尺寸（像素）
    fn extent(&self) -> (f32, f32) {
        let width = self
            .spans
            .iter()
            .map(|span| span.text.chars().count() as f32 * span.size() * GLYPH_WIDTH_RATIO)
            .sum::<f32>();
        let height = self
            .spans
            .iter()
            .map(TextSpan::size)
            .fold(0.0, f32::max)
            * LINE_HEIGHT_RATIO;
        (width.round(), height.round())
    }
}

impl Positionable for TextBox {
    fn position(&self, viewport: Viewport) -> Pose {
        let origin = viewport.denormalize(self.anchor);
        let (width, height) = self.extent();
        Pose::new(origin.x.round(), origin.y.round(), width, height)
    }

    fn set_position(&mut self, point: Point, viewport: Viewport) {
        self.anchor = viewport.normalize(point);
    }
}

impl Resizable for TextBox {
    fn size(&self, _viewport: Viewport) -> SizeValue {
        SizeValue::Scalar(self.spans[self.active_index(TraitKind::Size)].size())
    }

    fn resize(&mut self, size: SizeValue, permanent: bool, _viewport: Viewport) {
        let size = size.as_scalar();
        for span in self.targets_mut(TraitKind::Size) {
            if permanent {
                span.style.size = size;
                span.pending_size = None;
            } else {
                span.pending_size = Some(size);
            }
        }
    }

    /// 文本以活动片段的已提交字号为基准，而不是起点位姿
    fn resolve_size_baseline(&self, _origin: &Pose) -> SizeValue {
        SizeValue::Scalar(self.spans[self.active_index(TraitKind::Size)].style.size)
    }
}

impl Colorable for TextBox {
    fn color(&self) -> Rgba {
        self.spans[self.active_index(TraitKind::Color)].style.color
    }

    fn set_color(&mut self, color: Rgba, permanent: bool) {
        for span in self.targets_mut(TraitKind::Color) {
            if permanent {
                span.style.color = color;
                span.pending_color = None;
            } else {
                span.pending_color = Some(color);
            }
        }
    }
}

impl Renderable for TextBox {
    fn label(&self) -> String {
        format!("text({})", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 500.0);

    fn sample() -> TextBox {
        TextBox::new(
            0.1,
            0.2,
            vec![
                TextSpan::new("TEST", "body", FontStyle::new(20.0, Rgba::WHITE)),
                TextSpan::new("test", "rainbow", FontStyle::new(40.0, Rgba::rgb(244.0, 66.0, 66.0)))
                    .with_animations([TraitKind::Color, TraitKind::Size]),
                TextSpan::new("TEST", "body", FontStyle::new(20.0, Rgba::WHITE)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_text_box_rejected() {
        assert_eq!(TextBox::new(0.0, 0.0, vec![]), Err(ConfigError::EmptyTextBox));
    }

    #[test]
    fn test_position() {
        let mut text = sample();
        let pose = text.position(VIEWPORT);
        assert_eq!(pose.origin(), Point::new(100.0, 100.0));
        // 4×20×0.5 + 4×40×0.5 + 4×20×0.5
        assert_eq!(pose.width, 160.0);
        assert_eq!(pose.height, 48.0);

        text.set_position(Point::new(250.0, 125.0), VIEWPORT);
        assert_eq!(text.anchor(), Point::new(0.25, 0.25));
    }

    #[test]
    fn test_size_baseline_uses_active_span() {
        let text = sample();
        assert_eq!(
            text.resolve_size_baseline(&Pose::default()),
            SizeValue::Scalar(40.0)
        );
    }

    #[test]
    fn test_size_baseline_falls_back_to_first_span() {
        let text = TextBox::new(
            0.0,
            0.0,
            vec![TextSpan::new("Title", "title", FontStyle::new(60.0, Rgba::WHITE))],
        )
        .unwrap();
        assert_eq!(
            text.resolve_size_baseline(&Pose::default()),
            SizeValue::Scalar(60.0)
        );
    }

    #[test]
    fn test_resize_only_animated_spans() {
        let mut text = sample();
        text.resize(SizeValue::Scalar(30.0), false, VIEWPORT);
        assert_eq!(text.spans()[0].size(), 20.0);
        assert_eq!(text.spans()[1].size(), 30.0);
        // 基准仍是已提交值
        assert_eq!(text.spans()[1].style().size, 40.0);

        text.resize(SizeValue::Scalar(30.0), true, VIEWPORT);
        assert_eq!(text.spans()[1].style().size, 30.0);
    }

    #[test]
    fn test_color_targets_animated_spans() {
        let mut text = sample();
        assert_eq!(text.color(), Rgba::rgb(244.0, 66.0, 66.0));

        let cyan = Rgba::rgb(66.0, 244.0, 244.0);
        text.set_color(cyan, false);
        assert_eq!(text.spans()[1].color(), cyan);
        assert_eq!(text.spans()[0].color(), Rgba::WHITE);
        assert_eq!(text.color(), Rgba::rgb(244.0, 66.0, 66.0));

        text.set_color(cyan, true);
        assert_eq!(text.color(), cyan);
    }

    #[test]
    fn test_font_book_fallback() {
        let mut book = FontBook::new();
        assert_eq!(book.resolve(Some("title")).1, FontStyle::default());

        book.insert("body", FontStyle::new(24.0, Rgba::WHITE));
        assert_eq!(book.resolve(Some("missing")).0, "body");

        book.insert("default", FontStyle::new(18.0, Rgba::WHITE));
        assert_eq!(book.resolve(None).1.size, 18.0);
        assert_eq!(book.resolve(Some("body")).1.size, 24.0);
    }
}
