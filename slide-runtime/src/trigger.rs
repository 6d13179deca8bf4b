//! # Trigger 模块
//!
//! 触发器令牌与激活表达式。
//!
//! ## 令牌族
//!
//! ```text
//! 事件令牌    start / click N / 自定义名称
//! 生命周期令牌  NAME+ （运行中） / NAME- （刚完成）
//! ```
//!
//! 同一名称的 `NAME+` 与 `NAME-` 互斥；两者都不存在表示空闲。
//!
//! 激活表达式中的 `$` 引用 trait 自身名称，例如 `$+` 表示"自身正在运行"，
//! 用于让 trait 在运行期间保持激活。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 触发器令牌
///
/// 令牌不可变；字符串形式（`Display` / `FromStr`）与幻灯片定义文件中的写法一致。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trigger {
    /// 幻灯片开始
    Start,
    /// 第 N 次点击（单帧脉冲）
    Click(u32),
    /// trait 正在运行（`NAME+`）
    Running(String),
    /// trait 刚完成（`NAME-`）
    Done(String),
    /// 自定义事件
    Custom(String),
}

impl Trigger {
    /// 创建点击令牌
    pub fn click(n: u32) -> Self {
        Self::Click(n)
    }

    /// 创建运行中令牌
    pub fn running(name: impl Into<String>) -> Self {
        Self::Running(name.into())
    }

    /// 创建完成令牌
    pub fn done(name: impl Into<String>) -> Self {
        Self::Done(name.into())
    }

    /// 创建自定义令牌
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// 是否为单帧脉冲令牌（帧结束时撤销）
    pub fn is_pulse(&self) -> bool {
        matches!(self, Self::Start | Self::Click(_))
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Click(n) => write!(f, "click {n}"),
            Self::Running(name) => write!(f, "{name}+"),
            Self::Done(name) => write!(f, "{name}-"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for Trigger {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ConfigError::InvalidTrigger {
            expr: s.to_string(),
            message: message.to_string(),
        };

        let s_trimmed = s.trim();
        if s_trimmed.is_empty() {
            return Err(invalid("触发器不能为空"));
        }
        if s_trimmed.contains('$') {
            return Err(invalid("'$' 只能出现在激活表达式中"));
        }

        if s_trimmed == "start" {
            return Ok(Self::Start);
        }

        // 序号无法解析时，`click 1-` 之类仍可作为生命周期令牌
        if let Some(rest) = s_trimmed.strip_prefix("click ") {
            if let Ok(n) = rest.trim().parse::<u32>() {
                return Ok(Self::Click(n));
            }
            if !s_trimmed.ends_with(['+', '-']) {
                return Err(invalid("点击序号必须是非负整数"));
            }
        }

        if let Some(name) = s_trimmed.strip_suffix('+') {
            return lifecycle_name(name, s).map(Self::Running);
        }
        if let Some(name) = s_trimmed.strip_suffix('-') {
            return lifecycle_name(name, s).map(Self::Done);
        }

        Ok(Self::Custom(s_trimmed.to_string()))
    }
}

fn lifecycle_name(name: &str, raw: &str) -> Result<String, ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::InvalidTrigger {
            expr: raw.to_string(),
            message: "生命周期令牌缺少 trait 名称".to_string(),
        });
    }
    Ok(name.to_string())
}

/// 自引用标记
///
/// 激活表达式中 `$` 展开为 trait 自身名称。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelfMarker {
    /// `$`：与自身同名的自定义令牌
    Name,
    /// `$+`：自身运行中
    Running,
    /// `$-`：自身刚完成
    Done,
}

/// 激活表达式
///
/// 字面令牌或对 trait 自身的引用。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerExpr {
    /// 字面令牌
    Literal(Trigger),
    /// 自引用
    SelfRef(SelfMarker),
}

impl TriggerExpr {
    /// `$+`
    pub fn self_running() -> Self {
        Self::SelfRef(SelfMarker::Running)
    }

    /// `$-`
    pub fn self_done() -> Self {
        Self::SelfRef(SelfMarker::Done)
    }

    /// 展开为具体令牌
    ///
    /// # 参数
    /// - `owner`: 持有该表达式的 trait 名称
    pub fn resolve(&self, owner: &str) -> Trigger {
        match self {
            Self::Literal(trigger) => trigger.clone(),
            Self::SelfRef(SelfMarker::Name) => Trigger::Custom(owner.to_string()),
            Self::SelfRef(SelfMarker::Running) => Trigger::Running(owner.to_string()),
            Self::SelfRef(SelfMarker::Done) => Trigger::Done(owner.to_string()),
        }
    }

    /// 若表达式是点击令牌，返回点击序号
    pub fn click_number(&self) -> Option<u32> {
        match self {
            Self::Literal(Trigger::Click(n)) => Some(*n),
            _ => None,
        }
    }
}

impl From<Trigger> for TriggerExpr {
    fn from(trigger: Trigger) -> Self {
        Self::Literal(trigger)
    }
}

impl fmt::Display for TriggerExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(trigger) => write!(f, "{trigger}"),
            Self::SelfRef(SelfMarker::Name) => write!(f, "$"),
            Self::SelfRef(SelfMarker::Running) => write!(f, "$+"),
            Self::SelfRef(SelfMarker::Done) => write!(f, "$-"),
        }
    }
}

impl FromStr for TriggerExpr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(Self::SelfRef(SelfMarker::Name)),
            "$+" => Ok(Self::SelfRef(SelfMarker::Running)),
            "$-" => Ok(Self::SelfRef(SelfMarker::Done)),
            _ => s.parse().map(Self::Literal),
        }
    }
}

impl TryFrom<String> for TriggerExpr {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerExpr> for String {
    fn from(expr: TriggerExpr) -> Self {
        expr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_tokens() {
        assert_eq!("start".parse::<Trigger>().unwrap(), Trigger::Start);
        assert_eq!("click 2".parse::<Trigger>().unwrap(), Trigger::Click(2));
        assert_eq!(
            "reveal".parse::<Trigger>().unwrap(),
            Trigger::custom("reveal")
        );
    }

    #[test]
    fn test_parse_lifecycle_tokens() {
        assert_eq!(
            "title slide+".parse::<Trigger>().unwrap(),
            Trigger::running("title slide")
        );
        assert_eq!(
            "subheader slide-".parse::<Trigger>().unwrap(),
            Trigger::done("subheader slide")
        );
    }

    #[test]
    fn test_lifecycle_token_for_click_like_name() {
        assert_eq!(
            "click 1-".parse::<Trigger>().unwrap(),
            Trigger::done("click 1")
        );
        assert_eq!(
            "click 1+".parse::<Trigger>().unwrap(),
            Trigger::running("click 1")
        );
        assert_eq!(Trigger::done("click 1").to_string(), "click 1-");
    }

    #[test]
    fn test_parse_invalid_tokens() {
        assert!("click x".parse::<Trigger>().is_err());
        assert!("".parse::<Trigger>().is_err());
        assert!("+".parse::<Trigger>().is_err());
        assert!("$+".parse::<Trigger>().is_err());
    }

    #[test]
    fn test_display_matches_source_form() {
        for raw in ["start", "click 3", "image slide+", "image slide-", "reveal"] {
            let trigger: Trigger = raw.parse().unwrap();
            assert_eq!(trigger.to_string(), raw);
        }
    }

    #[test]
    fn test_self_reference_resolution() {
        let expr: TriggerExpr = "$+".parse().unwrap();
        assert_eq!(expr, TriggerExpr::self_running());
        assert_eq!(expr.resolve("rainbow"), Trigger::running("rainbow"));

        let expr: TriggerExpr = "$-".parse().unwrap();
        assert_eq!(expr.resolve("rainbow"), Trigger::done("rainbow"));

        let expr: TriggerExpr = "$".parse().unwrap();
        assert_eq!(expr.resolve("rainbow"), Trigger::custom("rainbow"));

        let expr: TriggerExpr = "other-".parse().unwrap();
        assert_eq!(expr.resolve("rainbow"), Trigger::done("other"));
    }

    #[test]
    fn test_click_number() {
        let expr: TriggerExpr = "click 4".parse().unwrap();
        assert_eq!(expr.click_number(), Some(4));
        assert_eq!(TriggerExpr::self_running().click_number(), None);
    }

    #[test]
    fn test_expr_serde() {
        let exprs: Vec<TriggerExpr> =
            serde_json::from_str(r#"["start", "$+", "title slide-"]"#).unwrap();
        assert_eq!(
            exprs,
            vec![
                TriggerExpr::Literal(Trigger::Start),
                TriggerExpr::self_running(),
                TriggerExpr::Literal(Trigger::done("title slide")),
            ]
        );

        let json = serde_json::to_string(&exprs).unwrap();
        assert_eq!(json, r#"["start","$+","title slide-"]"#);

        assert!(serde_json::from_str::<TriggerExpr>(r#""click two""#).is_err());
    }
}
