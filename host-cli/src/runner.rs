//! # Runner 模块
//!
//! 无头放映循环：用手动时钟逐帧驱动 [`SlideShow`]，在指定帧注入输入，
//! 并把每个渲染对象的位姿输出到日志中，代替真正的绘制。

use std::collections::BTreeMap;

use slide_runtime::{Clock, ManualClock, Millis, Rgba, SlideInput, SlideShow};
use tracing::{debug, info};

use crate::config::HostConfig;

/// 放映结果摘要
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// 实际运行的帧数
    pub frames: u32,
    /// 结束时所在页
    pub last_slide: usize,
    /// 是否已放映结束
    pub finished: bool,
    /// 按完成顺序记录的 trait 名称
    pub completed: Vec<String>,
}

/// 无头放映器
pub struct HeadlessRunner {
    show: SlideShow,
    clock: ManualClock,
    frame_millis: Millis,
    background: Rgba,
    inputs: BTreeMap<u32, Vec<SlideInput>>,
}

impl HeadlessRunner {
    /// 创建放映器
    pub fn new(show: SlideShow, config: &HostConfig) -> Self {
        let mut inputs: BTreeMap<u32, Vec<SlideInput>> = BTreeMap::new();
        for scripted in &config.inputs {
            inputs.entry(scripted.frame).or_default().push(scripted.input);
        }

        Self {
            show,
            clock: ManualClock::new(0.0),
            frame_millis: config.frame_millis(),
            background: config.background,
            inputs,
        }
    }

    /// 清屏背景色
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// 放映状态
    pub fn show(&self) -> &SlideShow {
        &self.show
    }

    /// 运行至多 `frames` 帧，放映结束时提前返回
    pub fn run(&mut self, frames: u32) -> RunSummary {
        let mut summary = RunSummary::default();

        for frame in 0..frames {
            if let Some(inputs) = self.inputs.get(&frame) {
                for input in inputs {
                    let event = self.show.handle_input(*input);
                    info!(frame, ?input, ?event, "处理输入");
                }
            }

            if self.show.is_finished() {
                break;
            }

            let report = self.show.frame(self.clock.now());
            summary.frames += 1;

            for name in &report.completed {
                info!(frame, slide = report.slide, trait_name = %name, "trait 完成");
            }
            summary.completed.extend(report.completed);

            self.log_items(frame);
            self.clock.advance(self.frame_millis);
        }

        summary.last_slide = self.show.current();
        summary.finished = self.show.is_finished();
        summary
    }

    fn log_items(&self, frame: u32) {
        let viewport = self.show.viewport();
        let [r, g, b, _] = self.background.to_rgba8();
        debug!(frame, r, g, b, "清屏");
        for (index, item) in self.show.items().enumerate() {
            let item = item.borrow();
            let pose = item.position(viewport);
            debug!(
                frame,
                index,
                item = %item.label(),
                x = pose.x,
                y = pose.y,
                width = pose.width,
                height = pose.height,
                "渲染"
            );
        }
    }
}
