//! # Host CLI
//!
//! 无头幻灯片宿主：加载幻灯片定义，用模拟时钟逐帧驱动放映，
//! 把渲染对象的位姿输出到日志中。
//!
//! - [`config`]：放映配置
//! - [`runner`]：无头放映循环

pub mod config;
pub mod runner;

pub use config::{ConfigError, HostConfig, ScriptedInput, ViewportConfig};
pub use runner::{HeadlessRunner, RunSummary};
