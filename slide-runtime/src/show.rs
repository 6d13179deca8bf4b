//! # Show 模块
//!
//! 放映状态：当前幻灯片、点击计数、触发器上下文与翻页决策。
//!
//! 渲染循环与设备输入由驱动方负责；驱动方每帧调用一次 [`SlideShow::frame`]，
//! 并把采集到的输入通过 [`SlideShow::handle_input`] 传入：
//!
//! ```text
//! Driver                          SlideShow
//!   │──── SlideInput ────────────►│ handle_input()
//!   │◄─── ShowEvent ──────────────│
//!   │──── now ───────────────────►│ frame()
//!   │◄─── FrameReport ────────────│
//!   │──── items() ── render ──────│
//! ```

use tracing::{debug, info, trace};

use crate::animation::{AnimatedObject, Frame, TraitReport};
use crate::clock::Millis;
use crate::definition::DeckDef;
use crate::error::{DeckError, SlideResult};
use crate::input::SlideInput;
use crate::renderable::{ItemHandle, Viewport};
use crate::trigger::Trigger;
use crate::trigger_set::TriggerSet;

/// 单页幻灯片
#[derive(Debug, Default)]
pub struct Slide {
    objects: Vec<AnimatedObject>,
}

impl Slide {
    /// 创建幻灯片
    pub fn new(objects: Vec<AnimatedObject>) -> Self {
        Self { objects }
    }

    /// 所有可动画对象
    pub fn objects(&self) -> &[AnimatedObject] {
        &self.objects
    }

    /// 本页引用的最大点击序号
    pub fn required_clicks(&self) -> u32 {
        self.objects
            .iter()
            .map(AnimatedObject::required_clicks)
            .max()
            .unwrap_or(0)
    }

    /// 本页的渲染对象（按声明顺序，即绘制顺序）
    pub fn items(&self) -> impl Iterator<Item = &ItemHandle> {
        self.objects.iter().map(AnimatedObject::item)
    }

    /// 对本页所有对象执行一帧动画
    pub fn animate(&mut self, triggers: &mut TriggerSet, frame: Frame) -> Vec<TraitReport> {
        self.objects
            .iter_mut()
            .flat_map(|object| object.animate(triggers, frame))
            .collect()
    }
}

/// 输入处理结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowEvent {
    /// 断言了 `click N`
    Fired(u32),
    /// 切换到第 N 页
    Advanced(usize),
    /// 放映结束
    Finished,
    /// 视口已更新
    Resized(Viewport),
    /// 输入被忽略（放映已结束，或视口尺寸无效）
    Ignored,
}

/// 单帧执行报告
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// 当前页序号
    pub slide: usize,
    /// 本帧运行中的 trait
    pub running: Vec<String>,
    /// 本帧完成的 trait
    pub completed: Vec<String>,
}

impl FrameReport {
    fn new(slide: usize) -> Self {
        Self {
            slide,
            ..Self::default()
        }
    }

    fn record(&mut self, report: TraitReport) {
        if report.completed {
            self.completed.push(report.name);
        } else {
            self.running.push(report.name);
        }
    }

    /// 本帧没有任何 trait 活动
    pub fn is_idle(&self) -> bool {
        self.running.is_empty() && self.completed.is_empty()
    }
}

/// 放映状态
///
/// 只能向前翻页，每页在进入时都是全新构建的对象。
#[derive(Debug)]
pub struct SlideShow {
    slides: Vec<Slide>,
    current: usize,
    clicks: u32,
    triggers: TriggerSet,
    viewport: Viewport,
    finished: bool,
}

impl SlideShow {
    /// 创建放映
    ///
    /// 从第一页开始，触发器集合只包含 `start`。
    pub fn new(slides: Vec<Slide>, viewport: Viewport) -> SlideResult<Self> {
        if slides.is_empty() {
            return Err(DeckError::NoSlides.into());
        }
        info!(slides = slides.len(), width = viewport.width, height = viewport.height, "放映开始");
        Ok(Self {
            slides,
            current: 0,
            clicks: 0,
            triggers: TriggerSet::seeded(),
            viewport,
            finished: false,
        })
    }

    /// 从幻灯片定义创建放映
    pub fn from_deck(deck: &DeckDef, viewport: Viewport) -> SlideResult<Self> {
        Self::new(deck.build()?, viewport)
    }

    /// 当前页序号
    pub fn current(&self) -> usize {
        self.current
    }

    /// 幻灯片总数
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// 当前页
    pub fn slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    /// 当前页已点击次数
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// 触发器集合
    pub fn triggers(&self) -> &TriggerSet {
        &self.triggers
    }

    /// 触发器集合（可变，用于断言自定义事件）
    pub fn triggers_mut(&mut self) -> &mut TriggerSet {
        &mut self.triggers
    }

    /// 当前视口
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 当前页的渲染对象
    pub fn items(&self) -> impl Iterator<Item = &ItemHandle> {
        self.slide().items()
    }

    /// 处理输入
    pub fn handle_input(&mut self, input: SlideInput) -> ShowEvent {
        if self.finished {
            trace!(?input, "放映已结束，忽略输入");
            return ShowEvent::Ignored;
        }

        match input {
            SlideInput::Click => self.click(),
            SlideInput::Advance => self.next_slide(),
            SlideInput::Quit => {
                info!(slide = self.current, "退出放映");
                self.finished = true;
                ShowEvent::Finished
            }
            SlideInput::Resize { width, height } => {
                let viewport = Viewport::new(width, height);
                if !viewport.is_drawable() {
                    // 最小化的窗口会报告 0×0，保留上一次的视口
                    debug!(width, height, "视口尺寸无效，忽略");
                    return ShowEvent::Ignored;
                }
                self.viewport = viewport;
                debug!(width, height, "视口尺寸变化");
                ShowEvent::Resized(self.viewport)
            }
        }
    }

    /// 点击
    ///
    /// 点击计数超过本页所需点击数时翻页，否则断言 `click N`。
    pub fn click(&mut self) -> ShowEvent {
        if self.finished {
            return ShowEvent::Ignored;
        }

        self.clicks += 1;
        let required = self.slide().required_clicks();
        if self.clicks > required {
            debug!(clicks = self.clicks, required, "点击数超出，翻页");
            return self.next_slide();
        }

        self.triggers.assert(Trigger::click(self.clicks));
        debug!(click = self.clicks, required, "点击");
        ShowEvent::Fired(self.clicks)
    }

    /// 翻页
    ///
    /// 清零点击计数并重置触发器集合；在最后一页时结束放映。
    pub fn next_slide(&mut self) -> ShowEvent {
        if self.finished {
            return ShowEvent::Ignored;
        }

        self.clicks = 0;
        self.triggers.reseed();

        if self.current + 1 >= self.slides.len() {
            info!(slide = self.current, "已是最后一页，放映结束");
            self.finished = true;
            return ShowEvent::Finished;
        }

        self.current += 1;
        info!(slide = self.current, "切换幻灯片");
        ShowEvent::Advanced(self.current)
    }

    /// 执行一帧
    ///
    /// 所有对象共享同一个 `now`；结束时撤销脉冲令牌。
    pub fn frame(&mut self, now: Millis) -> FrameReport {
        let mut report = FrameReport::new(self.current);
        if self.finished {
            return report;
        }

        let frame = Frame::new(now, self.viewport);
        for trait_report in self.slides[self.current].animate(&mut self.triggers, frame) {
            report.record(trait_report);
        }
        self.triggers.end_frame();

        trace!(now, triggers = %self.triggers, "帧结束");
        report
    }
}
