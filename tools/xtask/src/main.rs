//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `deck-check`: 检查幻灯片定义文件（格式、trait 构建、令牌引用、资源）

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use slide_runtime::{DeckDef, ItemDef, SlideDef, Trigger, TriggerExpr};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => check_all()?,
        "deck-check" => {
            let path = args.next();
            deck_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn check_all() -> anyhow::Result<()> {
    let sh = Shell::new()?;

    eprintln!("\n==> cargo fmt --all -- --check");
    cmd!(sh, "cargo fmt --all -- --check").run()?;

    eprintln!("\n==> cargo clippy --workspace --all-targets");
    cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

    eprintln!("\n==> cargo test --workspace");
    cmd!(sh, "cargo test --workspace").run()?;

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  deck-check      检查幻灯片定义文件

DECK-CHECK:
  cargo xtask deck-check [path]

  不带参数：检查 demos/decks/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 格式与字段错误
    - trait 构建错误（缺少 time/speed、目标值形状不匹配）
    - 引用了本页不存在的 trait 的生命周期令牌（NAME+ / NAME-）
    - 未定义的字体样式
    - 图片文件是否存在（相对于定义文件所在目录）

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo deck-check    -> cargo xtask deck-check
"#
    );
}

//=============================================================================
// deck-check 命令实现
//=============================================================================

/// 默认的幻灯片定义目录（相对于 workspace root）
const DEFAULT_DECKS_DIR: &str = "demos/decks";

/// 检查结果
#[derive(Default)]
struct DeckCheckResult {
    /// 检查的文件数量
    decks_checked: usize,
    /// 错误
    errors: Vec<String>,
    /// 警告
    warnings: Vec<String>,
}

/// 执行幻灯片定义检查
fn deck_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_deck_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_DECKS_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认目录不存在: {}\n请在 workspace 根目录运行，或指定文件路径",
                    dir.display()
                );
            }
            collect_deck_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到幻灯片定义文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个幻灯片定义文件...\n", files.len());

    let mut result = DeckCheckResult::default();
    for file in &files {
        check_deck_file(file, &mut result);
    }

    print_check_result(&result);

    if !result.errors.is_empty() {
        anyhow::bail!("幻灯片定义检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有 JSON 文件
fn collect_deck_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个文件
fn check_deck_file(file: &Path, result: &mut DeckCheckResult) {
    let deck_id = file.display().to_string();
    result.decks_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            result.errors.push(format!("{deck_id}: 无法读取文件 - {e}"));
            return;
        }
    };

    let deck = match DeckDef::from_json(&content) {
        Ok(deck) => deck,
        Err(e) => {
            result.errors.push(format!("{deck_id}: {e}"));
            return;
        }
    };

    if let Err(e) = deck.build() {
        result.errors.push(format!("{deck_id}: {e}"));
    }

    let base = file.parent().unwrap_or_else(|| Path::new("."));
    for (index, slide) in deck.slides.iter().enumerate() {
        for warning in lint_slide(&deck, slide, base) {
            result
                .warnings
                .push(format!("{deck_id}: 第 {index} 页: {warning}"));
        }
    }
}

/// 单页的静态检查
///
/// 不影响构建，只产生警告。
fn lint_slide(deck: &DeckDef, slide: &SlideDef, base: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    let names: BTreeSet<&str> = slide
        .objects
        .iter()
        .flat_map(|object| &object.traits)
        .map(|def| def.name.as_str())
        .collect();

    for def in slide.objects.iter().flat_map(|object| &object.traits) {
        for expr in &def.triggers {
            let TriggerExpr::Literal(Trigger::Running(name) | Trigger::Done(name)) = expr else {
                continue;
            };
            if !names.contains(name.as_str()) {
                warnings.push(format!(
                    "trait '{}' 引用了不存在的 trait 令牌 '{}'",
                    def.name, expr
                ));
            }
        }
    }

    for object in &slide.objects {
        match &object.item {
            ItemDef::Image { path, .. } => {
                if !base.join(path).exists() {
                    warnings.push(format!("图片不存在: {path}"));
                }
            }
            ItemDef::Text { spans, .. } => {
                for font in spans.iter().filter_map(|span| span.font.as_deref()) {
                    if deck.fonts.get(font).is_none() {
                        warnings.push(format!("字体样式未定义: {font}"));
                    }
                }
            }
        }
    }

    warnings
}

/// 输出检查结果
fn print_check_result(result: &DeckCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个文件", result.decks_checked);
    eprintln!();

    for error in &result.errors {
        eprintln!("[ERROR] {error}");
    }
    for warning in &result.warnings {
        eprintln!("[WARN] {warning}");
    }

    let error_count = result.errors.len();
    let warn_count = result.warnings.len();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
