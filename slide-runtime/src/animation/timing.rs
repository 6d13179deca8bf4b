//! # Timing 模块
//!
//! trait 的时间模型：固定时长或速度 + 加速度。
//!
//! 单位在构造时统一换算为毫秒：
//! - 时长：秒 × 1000
//! - 速度：每秒 ÷ 1000
//! - 加速度：每秒² ÷ 1 000 000

use crate::clock::Millis;
use crate::error::ConfigError;

/// 时间模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timing {
    /// 固定时长（毫秒）
    Fixed { duration: Millis },
    /// 速度（每毫秒）与加速度（每毫秒²）
    ///
    /// 进度按运动学位移计算，调用方需保证速度已按总位移归一化。
    RateBased { speed: f64, accel: f64 },
}

impl Timing {
    /// 固定时长（秒）
    pub fn seconds(seconds: f64) -> Result<Self, ConfigError> {
        if seconds < 0.0 {
            return Err(ConfigError::NegativeDuration { seconds });
        }
        Ok(Self::Fixed {
            duration: seconds * 1000.0,
        })
    }

    /// 速度（每秒）与加速度（每秒²）
    pub fn rate(speed: f64, accel: f64) -> Self {
        Self::RateBased {
            speed: speed / 1000.0,
            accel: accel / 1_000_000.0,
        }
    }

    /// 从可选参数构造
    ///
    /// 同时提供时长和速度时，时长优先；两者都没有时返回配置错误。
    /// 加速度只对速度模式生效。
    pub fn from_parts(
        speed: Option<f64>,
        time: Option<f64>,
        accel: f64,
    ) -> Result<Self, ConfigError> {
        match (time, speed) {
            (Some(time), _) => Self::seconds(time),
            (None, Some(speed)) => Ok(Self::rate(speed, accel)),
            (None, None) => Err(ConfigError::MissingTiming),
        }
    }

    /// 计算进度
    ///
    /// 返回值不做截断：`>= 1.0` 表示已完成，插值时由调用方截断到 `[0, 1]`。
    ///
    /// # 参数
    /// - `elapsed`: 启动后经过的毫秒数
    pub fn progress(&self, elapsed: Millis) -> f32 {
        let progress = match *self {
            Self::Fixed { duration } if duration == 0.0 => 1.0,
            Self::Fixed { duration } => elapsed / duration,
            Self::RateBased { speed, accel } => speed * elapsed + 0.5 * accel * elapsed * elapsed,
        };
        progress as f32
    }
}
