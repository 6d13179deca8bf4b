//! # Rule 模块
//!
//! 单条动画规则（trait）及其状态机。
//!
//! ## 状态转换
//!
//! ```text
//! Idle ──激活条件成立──► Running (NAME+，记录 start)
//!   ▲                       │ progress >= 1
//!   │                       ▼
//!   └──下一帧观察到 NAME-── Completed (NAME-，start 保留)
//! ```
//!
//! 每帧按顺序执行：
//! 1. 若 `NAME-` 存在：撤销并 `restart()`
//! 2. 检查激活表达式
//! 3. 若成立：断言 `NAME+`、撤销 `NAME-`，未启动则记录 `start = now`
//! 4. 计算进度；`>= 1` 时断言 `NAME-` 并撤销 `NAME+`

use tracing::{debug, trace};

use crate::clock::Millis;
use crate::trigger::{Trigger, TriggerExpr};
use crate::trigger_set::TriggerSet;

use super::{Target, Timing, TraitKind};

/// trait 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitState {
    /// 未启动或已重置
    Idle,
    /// 正在运行
    Running,
    /// 刚完成
    Completed,
}

/// 单帧评估结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitStep {
    /// 原始进度（未截断）
    pub progress: f32,
    /// 本帧是否完成
    pub completed: bool,
}

impl TraitStep {
    /// 截断到 `[0, 1]` 的进度，用于插值
    pub fn clamped(&self) -> f32 {
        self.progress.clamp(0.0, 1.0)
    }
}

/// 动画规则
///
/// 由名称、激活表达式、目标值和时间模型组成。
/// 生命周期令牌 `NAME+` / `NAME-` 在构造时生成并缓存。
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrait {
    name: String,
    activation: Vec<TriggerExpr>,
    target: Target,
    timing: Timing,
    start: Option<Millis>,
    running_token: Trigger,
    done_token: Trigger,
}

impl AnimationTrait {
    /// 创建新的动画规则
    ///
    /// # 参数
    /// - `name`: 规则名称，生命周期令牌由此派生
    /// - `activation`: 激活表达式，任意一个成立即激活
    /// - `target`: 目标值
    /// - `timing`: 时间模型
    pub fn new(
        name: impl Into<String>,
        activation: impl IntoIterator<Item = TriggerExpr>,
        target: Target,
        timing: Timing,
    ) -> Self {
        let name = name.into();
        Self {
            running_token: Trigger::running(name.clone()),
            done_token: Trigger::done(name.clone()),
            name,
            activation: activation.into_iter().collect(),
            target,
            timing,
            start: None,
        }
    }

    /// 规则名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 属性类型
    pub fn kind(&self) -> TraitKind {
        self.target.kind()
    }

    /// 目标值
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// 时间模型
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// 激活表达式
    pub fn activation(&self) -> &[TriggerExpr] {
        &self.activation
    }

    /// 启动时间戳
    pub fn start(&self) -> Option<Millis> {
        self.start
    }

    /// 重置：清除启动时间戳
    pub fn restart(&mut self) {
        self.start = None;
    }

    /// 任意激活表达式成立
    pub fn check_triggers(&self, triggers: &TriggerSet) -> bool {
        self.activation
            .iter()
            .any(|expr| triggers.matches(expr, &self.name))
    }

    /// 当前生命周期状态
    pub fn state(&self, triggers: &TriggerSet) -> TraitState {
        if triggers.contains(&self.done_token) {
            TraitState::Completed
        } else if triggers.contains(&self.running_token) {
            TraitState::Running
        } else {
            TraitState::Idle
        }
    }

    /// 查询 `now` 时刻的进度，截断到 `[0, 1]`；未启动时返回 `None`
    ///
    /// 完成后 start 保留到下一帧，此时查询结果为 1.0。
    pub fn progress(&self, now: Millis) -> Option<f32> {
        self.start
            .map(|start| self.timing.progress(now - start).clamp(0.0, 1.0))
    }

    /// 执行一帧状态机
    ///
    /// # 返回
    /// - `Some(step)`: 本帧处于运行中或刚完成，需要应用插值
    /// - `None`: 未激活
    pub fn step(&mut self, triggers: &mut TriggerSet, now: Millis) -> Option<TraitStep> {
        if triggers.retract(&self.done_token) {
            trace!(trait_name = %self.name, "观察到完成令牌，重置");
            self.restart();
        }

        if !self.check_triggers(triggers) {
            return None;
        }

        if triggers.assert(self.running_token.clone()) {
            debug!(trait_name = %self.name, kind = %self.kind(), "trait 开始运行");
        }
        triggers.retract(&self.done_token);

        let start = *self.start.get_or_insert(now);
        let progress = self.timing.progress(now - start);
        let completed = progress >= 1.0;

        if completed {
            triggers.assert(self.done_token.clone());
            triggers.retract(&self.running_token);
            debug!(trait_name = %self.name, progress, "trait 完成");
        }

        Some(TraitStep {
            progress,
            completed,
        })
    }
}
