//! # TriggerSet 模块
//!
//! 幻灯片作用域内的活跃触发器集合。
//!
//! 集合由引擎在每一帧中显式传入（而非全局变量）；
//! 切换幻灯片时通过 [`TriggerSet::reseed`] 整体替换内容。

use std::collections::BTreeSet;
use std::fmt;

use tracing::trace;

use crate::trigger::{Trigger, TriggerExpr};

/// 活跃触发器集合
///
/// 使用集合语义：重复 `assert` 是幂等的。
/// 内部有序，迭代与 `Display` 输出顺序确定。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSet {
    active: BTreeSet<Trigger>,
}

impl TriggerSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建只包含 `start` 的集合（幻灯片入口状态）
    pub fn seeded() -> Self {
        let mut set = Self::new();
        set.reseed();
        set
    }

    /// 断言令牌
    ///
    /// # 返回
    /// - `true`: 令牌此前不存在
    pub fn assert(&mut self, trigger: Trigger) -> bool {
        self.active.insert(trigger)
    }

    /// 撤销令牌
    ///
    /// # 返回
    /// - `true`: 令牌此前存在
    pub fn retract(&mut self, trigger: &Trigger) -> bool {
        self.active.remove(trigger)
    }

    /// 令牌是否存在
    pub fn contains(&self, trigger: &Trigger) -> bool {
        self.active.contains(trigger)
    }

    /// 激活表达式是否满足
    ///
    /// # 参数
    /// - `expr`: 激活表达式
    /// - `owner`: 表达式所属 trait 的名称（用于展开 `$`）
    pub fn matches(&self, expr: &TriggerExpr, owner: &str) -> bool {
        self.contains(&expr.resolve(owner))
    }

    /// 清空并重新放入 `start`
    pub fn reseed(&mut self) {
        self.active.clear();
        self.active.insert(Trigger::Start);
    }

    /// 帧结束处理
    ///
    /// 撤销所有脉冲令牌：每个 `click N` 只存活一帧，
    /// `start` 在第一次被观察到的那一帧之后撤销。
    pub fn end_frame(&mut self) {
        let before = self.active.len();
        self.active.retain(|trigger| !trigger.is_pulse());
        let pulses = before - self.active.len();
        if pulses > 0 {
            trace!(pulses, "帧结束：撤销脉冲令牌");
        }
    }

    /// 迭代所有活跃令牌
    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.active.iter()
    }

    /// 活跃令牌数量
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl fmt::Display for TriggerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, trigger) in self.active.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{trigger}\"")?;
        }
        write!(f, "]")
    }
}

impl FromIterator<Trigger> for TriggerSet {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_contains_start() {
        let set = TriggerSet::seeded();
        assert!(set.contains(&Trigger::Start));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_assert_is_idempotent() {
        let mut set = TriggerSet::new();
        assert!(set.assert(Trigger::running("a")));
        assert!(!set.assert(Trigger::running("a")));
        assert_eq!(set.len(), 1);

        assert!(set.retract(&Trigger::running("a")));
        assert!(!set.retract(&Trigger::running("a")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_end_frame_retracts_pulses_only() {
        let mut set = TriggerSet::seeded();
        set.assert(Trigger::click(1));
        set.assert(Trigger::click(2));
        set.assert(Trigger::running("title slide"));
        set.assert(Trigger::done("intro"));
        set.assert(Trigger::custom("reveal"));

        set.end_frame();

        insta::assert_debug_snapshot!(
            set.iter().map(ToString::to_string).collect::<Vec<_>>(),
            @r#"
        [
            "title slide+",
            "intro-",
            "reveal",
        ]
        "#
        );
    }

    #[test]
    fn test_reseed_replaces_contents() {
        let mut set: TriggerSet = [Trigger::done("a"), Trigger::click(3)].into_iter().collect();
        set.reseed();
        assert_eq!(set, TriggerSet::seeded());
    }

    #[test]
    fn test_matches_resolves_self_reference() {
        let mut set = TriggerSet::new();
        set.assert(Trigger::running("spin"));
        assert!(set.matches(&TriggerExpr::self_running(), "spin"));
        assert!(!set.matches(&TriggerExpr::self_running(), "other"));
    }

    #[test]
    fn test_display() {
        let set: TriggerSet = [Trigger::Start, Trigger::click(1)].into_iter().collect();
        assert_eq!(set.to_string(), r#"["start", "click 1"]"#);
    }
}
