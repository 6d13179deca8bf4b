//! # Slide Host
//!
//! 无头放映入口。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- demos/decks/auden.json
//! cargo run -p host-cli -- demos/decks/auden.json --click 60 --click 180 --frames 600
//! cargo run -p host-cli -- demos/decks/auden.json --log-level debug --fps 30
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use host_cli::{HeadlessRunner, HostConfig, ScriptedInput};
use slide_runtime::{DeckDef, SlideShow};
use tracing::info;

#[derive(Parser)]
#[command(name = "slide-host")]
#[command(about = "无头幻灯片放映 - 按帧驱动动画并输出日志")]
#[command(version)]
struct Cli {
    /// 幻灯片定义文件（JSON）
    deck: PathBuf,

    /// 配置文件（默认：config.json）
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 最多运行的帧数
    #[arg(long)]
    frames: Option<u32>,

    /// 模拟帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 在指定帧点击，可重复
    #[arg(long = "click", value_name = "FRAME")]
    clicks: Vec<u32>,

    /// 视口宽度
    #[arg(long)]
    width: Option<u32>,

    /// 视口高度
    #[arg(long)]
    height: Option<u32>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long)]
    log_level: Option<String>,

    /// 把最终生效的配置写入文件
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply(&self, config: &mut HostConfig) {
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(width) = self.width {
            config.viewport.width = width;
        }
        if let Some(height) = self.height {
            config.viewport.height = height;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config
            .inputs
            .extend(self.clicks.iter().copied().map(ScriptedInput::click));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = HostConfig::load(&cli.config);
    cli.apply(&mut config);
    config.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_target(false)
        .init();

    if let Some(path) = &cli.save_config {
        config
            .save(path)
            .with_context(|| format!("保存配置失败: {}", path.display()))?;
        info!(path = %path.display(), "配置已保存");
    }

    let text = fs::read_to_string(&cli.deck)
        .with_context(|| format!("读取幻灯片定义失败: {}", cli.deck.display()))?;
    let deck = DeckDef::from_json(&text)
        .with_context(|| format!("解析幻灯片定义失败: {}", cli.deck.display()))?;
    let show = SlideShow::from_deck(&deck, config.viewport())?;

    info!(
        deck = %cli.deck.display(),
        slides = show.slide_count(),
        frames = config.frames,
        fps = config.fps,
        "开始无头放映"
    );

    let mut runner = HeadlessRunner::new(show, &config);
    let summary = runner.run(config.frames);

    info!(
        frames = summary.frames,
        last_slide = summary.last_slide,
        finished = summary.finished,
        completed = summary.completed.len(),
        "放映结束"
    );

    Ok(())
}
