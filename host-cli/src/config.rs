//! # Config 模块
//!
//! 无头放映配置，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use slide_runtime::{Rgba, SlideInput, Viewport};
use thiserror::Error;
use tracing::Level;

/// 放映配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// 视口配置
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// 背景色（每帧清屏使用）
    #[serde(default = "default_background")]
    pub background: Rgba,

    /// 模拟帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 最多运行的帧数
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// 脚本化输入（按帧序号注入）
    #[serde(default)]
    pub inputs: Vec<ScriptedInput>,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 视口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// 视口宽度
    #[serde(default = "default_viewport_width")]
    pub width: u32,

    /// 视口高度
    #[serde(default = "default_viewport_height")]
    pub height: u32,
}

/// 在指定帧注入的输入
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    /// 帧序号（从 0 开始），输入在该帧动画之前处理
    pub frame: u32,
    /// 输入
    pub input: SlideInput,
}

impl ScriptedInput {
    /// 在第 `frame` 帧点击
    pub fn click(frame: u32) -> Self {
        Self {
            frame,
            input: SlideInput::Click,
        }
    }
}

// 默认值函数
fn default_background() -> Rgba {
    Rgba::rgb(0.0, 151.0, 167.0)
}

fn default_fps() -> u32 {
    60
}

fn default_frames() -> u32 {
    600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            background: default_background(),
            fps: default_fps(),
            frames: default_frames(),
            inputs: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl HostConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    /// 此时日志尚未初始化，警告直接写到标准错误。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            eprintln!("⚠️ 配置文件不存在: {:?}，使用默认配置", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("⚠️ 配置文件解析失败: {}，使用默认配置", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ 配置文件读取失败: {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 视口
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width as f32, self.viewport.height as f32)
    }

    /// 每帧的毫秒数
    pub fn frame_millis(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }

    /// 解析日志级别
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::ValidationFailed(format!("无效的日志级别: {}", self.log_level)))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::ValidationFailed(
                "视口宽高必须大于 0".to_string(),
            ));
        }

        if self.fps == 0 {
            return Err(ConfigError::ValidationFailed("帧率必须大于 0".to_string()));
        }

        self.level()?;

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
