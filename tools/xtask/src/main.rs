//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 cutscene-runtime 覆盖率
//! - `storyboard-check`: 检查分镜（校验、时长估算、可疑配置）

use std::path::PathBuf;
use std::process::{Command, ExitCode};

use anyhow::Context;
use cutscene_host::storyboard;
use cutscene_runtime::{AdvancePolicy, CueAction, SceneDescriptor, Storyboard};

/// 依次运行的 cargo 门禁步骤
const CHECK_ALL: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

/// 运行一条 cargo 命令，失败时带上完整命令行
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("无法启动 {line}"))?;
    anyhow::ensure!(status.success(), "{line} 失败（{status}）");
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match dispatch(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(args: &[String]) -> anyhow::Result<()> {
    let (sub, rest) = match args.split_first() {
        Some((sub, rest)) => (sub.as_str(), rest),
        None => ("help", &[][..]),
    };

    match sub {
        "check-all" => CHECK_ALL.iter().try_for_each(|step| cargo(step)),
        "cov-runtime" => {
            cargo(&["llvm-cov", "--version"])
                .context("需要 cargo-llvm-cov 与 llvm-tools-preview")?;
            cargo(&["llvm-cov", "-p", "cutscene-runtime", "--html"])?;
            eprintln!("\n覆盖率报告: target/llvm-cov/html/index.html");
            Ok(())
        }
        "storyboard-check" => {
            let paths: Vec<PathBuf> = rest.iter().map(PathBuf::from).collect();
            storyboard_check(&paths)
        }
        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => anyhow::bail!("未知的 xtask 子命令: {other}"),
    }
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all         运行 fmt、clippy、test 门禁检查
  cov-runtime       运行 cutscene-runtime 覆盖率报告
  storyboard-check  检查分镜

STORYBOARD-CHECK:
  cargo xtask storyboard-check [path...]

  不带参数：检查内置分镜
  带路径参数：检查指定的 JSON 分镜文件

  检查内容：
    - 分镜校验（时长、镜头、发射率、cue 时间）
    - 手动场景没有台词（只能靠点击推进）
    - 自动计时场景中永远不会触发的 cue
    - 台词停留总时长超过场景时长

别名见 .cargo/config.toml
"#
    );
}

//=============================================================================
// storyboard-check 命令实现
//=============================================================================

/// 分镜检查结果
#[derive(Debug, Default)]
struct StoryboardReport {
    scenes: usize,
    lines: usize,
    /// 自动计时场景的最短总时长（毫秒）
    timed_ms: f64,
    warnings: Vec<String>,
}

/// 执行分镜检查
fn storyboard_check(paths: &[PathBuf]) -> anyhow::Result<()> {
    let targets: Vec<(String, Storyboard)> = if paths.is_empty() {
        let builtin = storyboard::builtin().context("内置分镜校验失败")?;
        vec![("<builtin>".to_string(), builtin)]
    } else {
        paths
            .iter()
            .map(|path| -> anyhow::Result<(String, Storyboard)> {
                let loaded = storyboard::from_file(path)
                    .with_context(|| format!("分镜校验失败: {}", path.display()))?;
                Ok((path.display().to_string(), loaded))
            })
            .collect::<anyhow::Result<_>>()?
    };

    let mut total_warnings = 0;
    for (name, storyboard) in &targets {
        let report = inspect(storyboard);
        print_report(name, &report);
        total_warnings += report.warnings.len();
    }

    if total_warnings > 0 {
        eprintln!("\n⚠️ 共 {total_warnings} 条警告");
    } else {
        eprintln!("\n✅ 分镜检查通过");
    }
    Ok(())
}

fn inspect(storyboard: &Storyboard) -> StoryboardReport {
    let mut report = StoryboardReport {
        scenes: storyboard.len(),
        lines: storyboard.dialogue_count(),
        ..StoryboardReport::default()
    };

    for (index, scene) in storyboard.scenes().iter().enumerate() {
        inspect_scene(index, scene, &mut report);
    }
    report
}

fn inspect_scene(index: usize, scene: &SceneDescriptor, report: &mut StoryboardReport) {
    let label = format!("场景 {index}（{}）", scene.title);

    match scene.advance {
        AdvancePolicy::Manual if scene.dialogue.is_empty() => {
            report
                .warnings
                .push(format!("{label}: 手动场景没有台词，只能靠点击推进"));
        }
        AdvancePolicy::AutoTimed { duration_ms } => {
            report.timed_ms += duration_ms;

            for cue in scene.cues.iter().filter(|cue| cue.at_ms > duration_ms) {
                let what = match &cue.action {
                    CueAction::Shake(_) => "shake".to_string(),
                    CueAction::Signal { name } => name.clone(),
                };
                report.warnings.push(format!(
                    "{label}: cue {what} 在 {}ms，晚于场景时长 {duration_ms}ms",
                    cue.at_ms
                ));
            }

            let hold: f64 = scene.dialogue.iter().filter_map(|line| line.hold_ms).sum();
            if hold > duration_ms {
                report.warnings.push(format!(
                    "{label}: 台词停留总计 {hold}ms，超过场景时长 {duration_ms}ms"
                ));
            }
        }
        AdvancePolicy::Manual | AdvancePolicy::DialogueGated => {}
    }
}

fn print_report(name: &str, report: &StoryboardReport) {
    eprintln!("\n==> {name}");
    eprintln!("  场景: {}", report.scenes);
    eprintln!("  台词: {}", report.lines);
    eprintln!("  自动计时总时长: {:.1}s", report.timed_ms / 1000.0);
    for warning in &report.warnings {
        eprintln!("  ⚠️ {warning}");
    }
}
