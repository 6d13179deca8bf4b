//! # Clock 模块
//!
//! 单调毫秒时钟。
//!
//! 引擎每帧只采样一次 `now`，同一帧内所有 trait 共享该值，避免时间偏斜。

use std::cell::Cell;
use std::time::Instant;

/// 毫秒时间戳
pub type Millis = f64;

/// 时钟接口
pub trait Clock {
    /// 当前单调时间（毫秒）
    fn now(&self) -> Millis;
}

/// 系统单调时钟
///
/// 以创建时刻为零点。
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// 创建新的系统时钟
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }
}

/// 手动推进的时钟
///
/// 用于无头运行与测试；内部可变，时钟可以被多处共享读取。
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    /// 创建从 `start` 开始的时钟
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// 前进 `delta` 毫秒
    pub fn advance(&self, delta: Millis) {
        self.now.set(self.now.get() + delta);
    }

    /// 设置为绝对时间
    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
