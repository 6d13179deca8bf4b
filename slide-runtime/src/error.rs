//! # Error 模块
//!
//! 定义 slide-runtime 中使用的错误类型。
//!
//! 动画循环本身不产生错误：状态转换完全由触发器集合的成员关系驱动。
//! 错误只出现在构建阶段（幻灯片数据编写错误）。

use thiserror::Error;

use crate::animation::TraitKind;

/// 配置错误
///
/// 表示幻灯片数据的编写错误，构建时立即失败，不应被静默重试。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 既没有速度也没有时长
    #[error("Speed or Time must be provided")]
    MissingTiming,

    /// 时长为负数
    #[error("无效的时长 {seconds} 秒：时长不能为负数")]
    NegativeDuration { seconds: f64 },

    /// 目标值形状与动画类型不匹配
    #[error("{kind} 动画的目标值无效：期望 {expected}")]
    TargetMismatch {
        kind: TraitKind,
        expected: &'static str,
    },

    /// 无效的颜色分量
    #[error("无效的颜色：需要 3 或 4 个分量，实际 {len} 个")]
    InvalidColor { len: usize },

    /// 无效的触发器表达式
    #[error("无效的触发器表达式 '{expr}'：{message}")]
    InvalidTrigger { expr: String, message: String },

    /// 空文本框
    #[error("文本框至少需要一个文本片段")]
    EmptyTextBox,
}

/// 幻灯片定义错误
///
/// 带有出错位置的定义加载错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeckError {
    /// 定义文件解析失败
    #[error("幻灯片定义解析失败：{message}")]
    Parse { message: String },

    /// trait 构建失败
    #[error("第 {slide} 页第 {object} 个对象的 trait '{name}'：{source}")]
    InvalidTrait {
        slide: usize,
        object: usize,
        name: String,
        #[source]
        source: ConfigError,
    },

    /// 对象构建失败
    #[error("第 {slide} 页第 {object} 个对象：{source}")]
    InvalidObject {
        slide: usize,
        object: usize,
        #[source]
        source: ConfigError,
    },

    /// 没有任何幻灯片
    #[error("幻灯片定义中没有任何幻灯片")]
    NoSlides,

    /// 幻灯片序号越界
    #[error("幻灯片 {index} 不存在")]
    MissingSlide { index: usize },
}

/// slide-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlideError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 定义错误
    #[error("定义错误: {0}")]
    Deck(#[from] DeckError),
}

/// Result 类型别名
pub type SlideResult<T> = Result<T, SlideError>;
