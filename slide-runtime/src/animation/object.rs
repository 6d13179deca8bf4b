//! # Object 模块
//!
//! 可动画对象：把可渲染对象与一组有序的动画规则绑定。
//!
//! 对象第一次被动画时记录渲染对象的位姿作为起点（origin），
//! 之后所有位置/尺寸插值都以该起点为基准，而不是实时位姿。

use crate::interpolate::{Pose, lerp_color, locate};
use crate::renderable::{ItemHandle, Renderable, Viewport};
use crate::trigger_set::TriggerSet;

use super::{AnimationTrait, Frame, Target, TraitKind, TraitStep};

/// 单条规则在一帧内的执行报告
#[derive(Debug, Clone, PartialEq)]
pub struct TraitReport {
    /// 规则名称
    pub name: String,
    /// 属性类型
    pub kind: TraitKind,
    /// 原始进度
    pub progress: f32,
    /// 本帧是否完成
    pub completed: bool,
}

/// 可动画对象
///
/// 独占持有规则；渲染对象通过共享句柄引用，生命周期由驱动方管理。
pub struct AnimatedObject {
    item: ItemHandle,
    origin: Option<Pose>,
    traits: Vec<AnimationTrait>,
}

impl std::fmt::Debug for AnimatedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedObject")
            .field("item", &self.item.borrow().label())
            .field("origin", &self.origin)
            .field("traits", &self.traits.len())
            .finish()
    }
}

impl AnimatedObject {
    /// 创建新的可动画对象
    ///
    /// 起点在第一次 [`animate`](Self::animate) 时记录。
    pub fn new(item: ItemHandle, traits: Vec<AnimationTrait>) -> Self {
        Self {
            item,
            origin: None,
            traits,
        }
    }

    /// 创建不带规则的静态对象
    pub fn still(item: ItemHandle) -> Self {
        Self::new(item, Vec::new())
    }

    /// 显式指定起点
    pub fn with_origin(mut self, origin: Pose) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 渲染对象句柄
    pub fn item(&self) -> &ItemHandle {
        &self.item
    }

    /// 起点位姿
    pub fn origin(&self) -> Option<Pose> {
        self.origin
    }

    /// 规则列表
    pub fn traits(&self) -> &[AnimationTrait] {
        &self.traits
    }

    /// 本对象的规则中引用的最大点击序号
    pub fn required_clicks(&self) -> u32 {
        self.traits
            .iter()
            .flat_map(|rule| rule.activation())
            .filter_map(|expr| expr.click_number())
            .max()
            .unwrap_or(0)
    }

    /// 执行一帧动画
    ///
    /// 按声明顺序执行每条规则的状态机；运行中或刚完成的规则按类型写回渲染对象。
    /// 后面的规则能看到前面规则在同一帧内的修改。
    pub fn animate(&mut self, triggers: &mut TriggerSet, frame: Frame) -> Vec<TraitReport> {
        let mut item = self.item.borrow_mut();
        let origin = *self
            .origin
            .get_or_insert_with(|| item.position(frame.viewport));

        let mut reports = Vec::new();
        for rule in &mut self.traits {
            let Some(step) = rule.step(triggers, frame.now) else {
                continue;
            };

            apply(&mut *item, rule.target(), &origin, step, frame.viewport);

            reports.push(TraitReport {
                name: rule.name().to_string(),
                kind: rule.kind(),
                progress: step.progress,
                completed: step.completed,
            });
        }
        reports
    }
}

/// 把插值结果写回渲染对象
///
/// 进度截断到 `[0, 1]` 后用于插值；原始进度 `>= 1` 时以永久方式提交。
fn apply(item: &mut dyn Renderable, target: &Target, origin: &Pose, step: TraitStep, viewport: Viewport) {
    let p = step.clamped();
    let permanent = step.completed;

    match target {
        Target::Location(to) => {
            let from = origin.origin();
            let point = locate(from, to.resolve(from), p).snapped();
            item.set_position(point, viewport);
        }
        Target::Color(to) => {
            let color = lerp_color(item.color(), *to, p);
            item.set_color(color, permanent);
        }
        Target::Size(to) => {
            let baseline = item.resolve_size_baseline(origin);
            item.resize(baseline.lerp(*to, p), permanent, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Timing;
    use crate::interpolate::{Point, Rgba, Size, SizeValue};
    use crate::renderable::{
        FontStyle, ImageItem, Pins, Positionable, Resizable, TextBox, TextSpan, share,
    };
    use crate::trigger::{Trigger, TriggerExpr};

    const VIEWPORT: Viewport = Viewport::new(1000.0, 500.0);

    fn rule(name: &str, trigger: Trigger, target: Target, seconds: f64) -> AnimationTrait {
        AnimationTrait::new(
            name,
            [trigger.into(), TriggerExpr::self_running()],
            target,
            Timing::seconds(seconds).unwrap(),
        )
    }

    fn frame(now: f64) -> Frame {
        Frame::new(now, VIEWPORT)
    }

    #[test]
    fn test_origin_captured_once() {
        let image = share(ImageItem::new("a.png", Pins::new(0.1, 0.2, 0.2, 0.4)));
        let mut object = AnimatedObject::new(
            image.clone(),
            vec![rule("slide", Trigger::Start, Target::move_to(300.0, 100.0), 1.0)],
        );
        let mut triggers = TriggerSet::seeded();

        object.animate(&mut triggers, frame(0.0));
        assert_eq!(object.origin(), Some(Pose::new(100.0, 100.0, 100.0, 100.0)));

        object.animate(&mut triggers, frame(500.0));
        assert_eq!(image.borrow().position(VIEWPORT).origin(), Point::new(200.0, 100.0));
        // 起点不随当前位置变化
        assert_eq!(object.origin(), Some(Pose::new(100.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_explicit_origin() {
        let image = share(ImageItem::new("a.png", Pins::new(0.5, 0.5, 0.6, 0.6)));
        let mut object = AnimatedObject::new(
            image.clone(),
            vec![rule("slide", Trigger::Start, Target::move_x(100.0), 1.0)],
        )
        .with_origin(Pose::new(0.0, 0.0, 100.0, 50.0));
        let mut triggers = TriggerSet::seeded();

        object.animate(&mut triggers, frame(0.0));
        assert_eq!(image.borrow().position(VIEWPORT).origin(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_image_size_pending_until_completion() {
        let image = share(ImageItem::new("a.png", Pins::new(0.0, 0.0, 0.1, 0.2)));
        let mut object = AnimatedObject::new(
            image.clone(),
            vec![rule("grow", Trigger::Start, Target::resize(200.0, 200.0), 1.0)],
        );
        let mut triggers = TriggerSet::seeded();

        object.animate(&mut triggers, frame(0.0));
        let reports = object.animate(&mut triggers, frame(500.0));
        assert_eq!(reports[0].progress, 0.5);
        assert!(!reports[0].completed);
        assert_eq!(image.borrow().size(VIEWPORT), SizeValue::Pair(Size::new(150.0, 150.0)));
        assert_eq!(image.borrow().pins(), Pins::new(0.0, 0.0, 0.1, 0.2));

        let reports = object.animate(&mut triggers, frame(1000.0));
        assert!(reports[0].completed);
        assert_eq!(image.borrow().pending_pins(), None);
        assert_eq!(image.borrow().pins().to_pose(VIEWPORT).size(), Size::new(200.0, 200.0));
    }

    #[test]
    fn test_text_size_and_color() {
        let text = share(
            TextBox::new(
                0.0,
                0.0,
                vec![
                    TextSpan::new("TEST", "body", FontStyle::new(20.0, Rgba::WHITE)),
                    TextSpan::new("test", "rainbow", FontStyle::new(40.0, Rgba::rgb(255.0, 0.0, 0.0)))
                        .with_animations([TraitKind::Size, TraitKind::Color]),
                ],
            )
            .unwrap(),
        );
        let mut object = AnimatedObject::new(
            text.clone(),
            vec![
                rule("shrink", Trigger::Start, Target::font_size(30.0), 1.0),
                rule("shift", Trigger::Start, Target::color(Rgba::rgb(0.0, 0.0, 255.0)), 1.0),
            ],
        );
        let mut triggers = TriggerSet::seeded();

        object.animate(&mut triggers, frame(0.0));
        object.animate(&mut triggers, frame(500.0));
        {
            let text = text.borrow();
            assert_eq!(text.spans()[1].size(), 35.0);
            assert_eq!(text.spans()[0].size(), 20.0);
            // 红到蓝的 HSL 中点是绿色
            let [r, g, b, _] = text.spans()[1].color().to_rgba8();
            assert!(r <= 1 && g >= 254 && b <= 1);
        }

        object.animate(&mut triggers, frame(1000.0));
        let text = text.borrow();
        assert_eq!(text.spans()[1].style().size, 30.0);
        assert_eq!(text.spans()[1].style().color.to_rgba8(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_later_trait_sees_same_frame_completion() {
        let image = share(ImageItem::new("a.png", Pins::new(0.0, 0.0, 0.1, 0.1)));
        let mut object = AnimatedObject::new(
            image.clone(),
            vec![
                rule("first", Trigger::Start, Target::move_x(100.0), 0.0),
                rule("second", Trigger::done("first"), Target::move_y(100.0), 1.0),
            ],
        );
        let mut triggers = TriggerSet::seeded();

        let reports = object.animate(&mut triggers, frame(0.0));
        assert_eq!(reports.len(), 2);
        assert!(reports[0].completed);
        assert_eq!(reports[1].name, "second");
        assert_eq!(reports[1].progress, 0.0);
    }

    #[test]
    fn test_required_clicks() {
        let image = share(ImageItem::new("a.png", Pins::new(0.0, 0.0, 0.1, 0.1)));
        let object = AnimatedObject::new(
            image,
            vec![
                rule("a", Trigger::click(1), Target::move_x(10.0), 1.0),
                rule("b", Trigger::click(3), Target::move_x(10.0), 1.0),
                rule("c", Trigger::Start, Target::move_x(10.0), 1.0),
            ],
        );
        assert_eq!(object.required_clicks(), 3);

        let still = AnimatedObject::still(share(ImageItem::new("b.png", Pins::new(0.0, 0.0, 1.0, 1.0))));
        assert_eq!(still.required_clicks(), 0);
    }
}
