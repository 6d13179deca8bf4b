//! # Definition 模块
//!
//! 幻灯片定义：可序列化的编写数据，以及到运行时对象的构建。
//!
//! ## 格式示例
//!
//! ```json
//! {
//!   "fonts": { "title": { "size": 60, "color": [255, 255, 255] } },
//!   "slides": [
//!     { "objects": [
//!       { "item": { "type": "text", "x": -1, "y": 0.1,
//!                   "spans": [{ "text": "Wystan Hugh Auden", "font": "title" }] },
//!         "traits": [{ "kind": "location", "name": "title slide",
//!                      "triggers": ["start", "$+"], "target": [100, null], "time": 1 }] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! 时间单位：`time` 秒，`speed` 每秒，`accel` 每秒²。

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{AnimatedObject, AnimationTrait, Target, Timing, TraitKind};
use crate::error::{ConfigError, DeckError, SlideError, SlideResult};
use crate::interpolate::{LocationTarget, Rgba, Size, SizeValue};
use crate::renderable::{FontBook, ImageItem, ItemHandle, Pins, TextBox, TextSpan, share};
use crate::show::Slide;
use crate::trigger::TriggerExpr;

/// 整套幻灯片定义
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckDef {
    /// 命名字体样式
    #[serde(default)]
    pub fonts: FontBook,
    /// 幻灯片列表
    pub slides: Vec<SlideDef>,
}

/// 单页幻灯片定义
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideDef {
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

/// 可动画对象定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDef {
    pub item: ItemDef,
    #[serde(default)]
    pub traits: Vec<TraitDef>,
}

/// 渲染对象定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemDef {
    /// 图片
    Image { path: String, pins: Pins },
    /// 文本框
    Text { x: f32, y: f32, spans: Vec<SpanDef> },
}

/// 文本片段定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanDef {
    pub text: String,
    /// 字体样式名，缺省或不存在时回退
    #[serde(default)]
    pub font: Option<String>,
    /// 参与的动画类型
    #[serde(default)]
    pub animations: Vec<TraitKind>,
}

/// 动画规则定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDef {
    pub kind: TraitKind,
    pub name: String,
    pub triggers: Vec<TriggerExpr>,
    pub target: TargetDef,
    /// 速度（每秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// 时长（秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// 加速度（每秒²），只对速度模式生效
    #[serde(default)]
    pub accel: f64,
}

/// 目标值的原始形状
///
/// 具体含义由 [`TraitKind`] 决定，见 [`TargetDef::into_target`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetDef {
    /// 单个数值：字号
    Scalar(f32),
    /// 两个可空分量：位置或像素尺寸
    Axes([Option<f32>; 2]),
    /// 数值列表：颜色
    List(Vec<f32>),
}

impl TargetDef {
    /// 按属性类型解释目标值
    pub fn into_target(&self, kind: TraitKind) -> Result<Target, ConfigError> {
        let mismatch = |expected| ConfigError::TargetMismatch { kind, expected };

        match (kind, self) {
            (TraitKind::Location, Self::Axes([x, y])) => {
                Ok(Target::Location(LocationTarget::new(*x, *y)))
            }
            (TraitKind::Location, _) => Err(mismatch("[x, y]，分量可为 null")),

            (TraitKind::Color, Self::List(values)) => {
                Ok(Target::Color(Rgba::try_from(values.clone())?))
            }
            (TraitKind::Color, _) => Err(mismatch("[r, g, b] 或 [r, g, b, a]")),

            (TraitKind::Size, Self::Scalar(size)) => Ok(Target::Size(SizeValue::Scalar(*size))),
            (TraitKind::Size, Self::Axes([Some(w), Some(h)])) => {
                Ok(Target::Size(SizeValue::Pair(Size::new(*w, *h))))
            }
            (TraitKind::Size, _) => Err(mismatch("字号或 [width, height]")),
        }
    }
}

impl TraitDef {
    /// 构建动画规则
    pub fn build(&self) -> Result<AnimationTrait, ConfigError> {
        let timing = Timing::from_parts(self.speed, self.time, self.accel)?;
        let target = self.target.into_target(self.kind)?;
        Ok(AnimationTrait::new(
            self.name.clone(),
            self.triggers.iter().cloned(),
            target,
            timing,
        ))
    }
}

impl ItemDef {
    /// 构建渲染对象
    pub fn build(&self, fonts: &FontBook) -> Result<ItemHandle, ConfigError> {
        match self {
            Self::Image { path, pins } => {
                let item: ItemHandle = share(ImageItem::new(path.clone(), *pins));
                Ok(item)
            }
            Self::Text { x, y, spans } => {
                let spans = spans
                    .iter()
                    .map(|span| {
                        let (font, style) = fonts.resolve(span.font.as_deref());
                        TextSpan::new(span.text.clone(), font, style)
                            .with_animations(span.animations.iter().copied())
                    })
                    .collect();
                let item: ItemHandle = share(TextBox::new(*x, *y, spans)?);
                Ok(item)
            }
        }
    }
}

impl DeckDef {
    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> SlideResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            SlideError::from(DeckError::Parse {
                message: e.to_string(),
            })
        })
    }

    /// 构建指定页的运行时对象
    ///
    /// 每次调用都会创建全新的对象与规则实例。
    pub fn build_slide(&self, index: usize) -> Result<Slide, DeckError> {
        let def = self
            .slides
            .get(index)
            .ok_or(DeckError::MissingSlide { index })?;

        let mut objects = Vec::with_capacity(def.objects.len());
        for (object_index, object) in def.objects.iter().enumerate() {
            let item = object
                .item
                .build(&self.fonts)
                .map_err(|source| DeckError::InvalidObject {
                    slide: index,
                    object: object_index,
                    source,
                })?;

            let traits = object
                .traits
                .iter()
                .map(|rule| {
                    rule.build().map_err(|source| DeckError::InvalidTrait {
                        slide: index,
                        object: object_index,
                        name: rule.name.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            objects.push(AnimatedObject::new(item, traits));
        }

        debug!(slide = index, objects = objects.len(), "幻灯片构建完成");
        Ok(Slide::new(objects))
    }

    /// 构建全部幻灯片
    pub fn build(&self) -> Result<Vec<Slide>, DeckError> {
        if self.slides.is_empty() {
            return Err(DeckError::NoSlides);
        }
        (0..self.slides.len())
            .map(|index| self.build_slide(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::Trigger;

    const AUDEN: &str = r#"{
        "fonts": {
            "title": { "size": 60, "color": [255, 255, 255] },
            "subheader": { "size": 36, "color": [200, 200, 200] }
        },
        "slides": [
            { "objects": [
                { "item": { "type": "text", "x": -1, "y": 0.1,
                            "spans": [{ "text": "Wystan Hugh Auden", "font": "title" }] },
                  "traits": [{ "kind": "location", "name": "title slide",
                               "triggers": ["start", "$+"], "target": [100, null], "time": 1 }] },
                { "item": { "type": "text", "x": -1, "y": 0.2,
                            "spans": [{ "text": "1907 - 1973", "font": "subheader",
                                        "animations": ["color"] }] },
                  "traits": [{ "kind": "location", "name": "subheader slide",
                               "triggers": ["click 1", "$+"], "target": [1000, null], "time": 1 }] },
                { "item": { "type": "image", "path": "auden.jpg", "pins": [-1, 0.3, -0.5, 0.8] },
                  "traits": [
                      { "kind": "location", "name": "image slide",
                        "triggers": ["subheader slide-", "$+"], "target": [300, null], "time": 0 },
                      { "kind": "size", "name": "image size",
                        "triggers": ["click 2", "$+"], "target": [200, 200], "time": 3 }
                  ] }
            ] }
        ]
    }"#;

    #[test]
    fn test_parse_and_build_deck() {
        let deck = DeckDef::from_json(AUDEN).unwrap();
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.fonts.get("title").unwrap().size, 60.0);

        let slides = deck.build().unwrap();
        let slide = &slides[0];
        assert_eq!(slide.objects().len(), 3);
        assert_eq!(slide.required_clicks(), 2);

        let image = &slide.objects()[2];
        assert_eq!(image.traits()[0].activation()[0], TriggerExpr::Literal(Trigger::done("subheader slide")));
        assert_eq!(image.traits()[1].target(), &Target::resize(200.0, 200.0));
    }

    #[test]
    fn test_missing_timing_reports_location() {
        let json = r#"{ "slides": [ { "objects": [
            { "item": { "type": "image", "path": "a.png", "pins": [0, 0, 1, 1] },
              "traits": [{ "kind": "size", "name": "grow", "triggers": ["start"], "target": 10 }] }
        ] } ] }"#;
        let deck = DeckDef::from_json(json).unwrap();
        let err = deck.build().unwrap_err();
        assert_eq!(
            err,
            DeckError::InvalidTrait {
                slide: 0,
                object: 0,
                name: "grow".to_string(),
                source: ConfigError::MissingTiming,
            }
        );
    }

    #[test]
    fn test_target_shapes() {
        assert_eq!(
            TargetDef::Axes([Some(100.0), None]).into_target(TraitKind::Location),
            Ok(Target::Location(LocationTarget::x(100.0)))
        );
        assert_eq!(
            TargetDef::List(vec![244.0, 66.0, 66.0]).into_target(TraitKind::Color),
            Ok(Target::color(Rgba::rgb(244.0, 66.0, 66.0)))
        );
        assert_eq!(
            TargetDef::Scalar(30.0).into_target(TraitKind::Size),
            Ok(Target::font_size(30.0))
        );
        assert!(matches!(
            TargetDef::Axes([Some(1.0), None]).into_target(TraitKind::Size),
            Err(ConfigError::TargetMismatch { kind: TraitKind::Size, .. })
        ));
        assert!(matches!(
            TargetDef::Scalar(1.0).into_target(TraitKind::Color),
            Err(ConfigError::TargetMismatch { .. })
        ));
        assert_eq!(
            TargetDef::List(vec![1.0, 2.0, 3.0, 4.0, 5.0]).into_target(TraitKind::Color),
            Err(ConfigError::InvalidColor { len: 5 })
        );
    }

    #[test]
    fn test_untagged_target_parsing() {
        let targets: Vec<TargetDef> =
            serde_json::from_str("[30, [100, null], [200, 200], [244, 66, 66]]").unwrap();
        assert_eq!(
            targets,
            vec![
                TargetDef::Scalar(30.0),
                TargetDef::Axes([Some(100.0), None]),
                TargetDef::Axes([Some(200.0), Some(200.0)]),
                TargetDef::List(vec![244.0, 66.0, 66.0]),
            ]
        );
    }

    #[test]
    fn test_invalid_json() {
        assert!(DeckDef::from_json("{ \"slides\": [ { \"objects\": 3 } ] }").is_err());
        assert!(DeckDef::from_json(r#"{ "slides": [ { "objects": [
            { "item": { "type": "image", "path": "a", "pins": [0, 0, 1, 1] },
              "traits": [{ "kind": "size", "name": "x", "triggers": ["click two"], "target": 1, "time": 1 }] }
        ] } ] }"#).is_err());
    }

    #[test]
    fn test_empty_deck() {
        let deck = DeckDef::default();
        assert_eq!(deck.build().unwrap_err(), DeckError::NoSlides);
    }
}
