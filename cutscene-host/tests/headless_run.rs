//! # 无头播放集成测试
//!
//! 测试 配置 → 分镜 → App 主循环 → RunSummary 的完整链路。
//! 使用模拟时钟，不休眠、不依赖真实设备。

use std::fs;

use cutscene_host::{App, AppConfig, HostError, storyboard};

/// 测试内置分镜无需点击即可完整播放
#[test]
fn test_builtin_plays_to_end() {
    let summary = App::from_config(AppConfig::default()).unwrap().run();

    assert!(!summary.hit_frame_limit);
    assert_eq!(summary.plays_completed, 1);
    assert_eq!(summary.scenes_entered, 6);
    assert_eq!(summary.lines_shown, 5);
    assert_eq!(summary.render.lines_displayed, 5);
    assert!(summary.render.peak_particles > 0);
    assert!(summary.render.shaking_frames > 0);

    // 自动计时场景总时长 33 秒，最后一幕由台词停留推进
    assert!(summary.elapsed_ms >= 33_000.0);
    assert!(summary.elapsed_ms < 40_000.0);

    insta::assert_snapshot!(summary.signals.join("\n"), @r"
    sfx_cell
    symbol_dove
    sfx_scream
    sfx_transformation
    ");
}

/// 测试播完后点击重播
#[test]
fn test_loops_restart_after_finish() {
    let mut config = AppConfig::default();
    config.playback.loops = 2;
    let summary = App::from_config(config).unwrap().run();

    assert_eq!(summary.plays_completed, 2);
    assert_eq!(summary.scenes_entered, 12);
    assert_eq!(summary.lines_shown, 10);
    assert_eq!(summary.signals.len(), 8);
}

/// 测试相同种子的两次播放结果一致
#[test]
fn test_same_seed_same_summary() {
    let first = App::from_config(AppConfig::default()).unwrap().run();
    let second = App::from_config(AppConfig::default()).unwrap().run();
    assert_eq!(first, second);
}

/// 测试配置保存后重新加载
#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = AppConfig::default();
    config.director.seed = 42;
    config.playback.realtime = true;
    config.playback.auto_advance_interval_ms = Some(900.0);
    config.input.min_advance_interval_ms = 80.0;
    config.log.level = "debug".to_string();
    config.save(&path).unwrap();

    let loaded = AppConfig::try_load(&path).unwrap();
    assert_eq!(loaded.director.seed, 42);
    assert!(loaded.playback.realtime);
    assert_eq!(loaded.playback.auto_advance_interval_ms, Some(900.0));
    assert_eq!(loaded.input.min_advance_interval_ms, 80.0);
    assert_eq!(loaded.log.level, "debug");
}

/// 测试配置文件缺失或损坏时回退到默认值
#[test]
fn test_config_fallback() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        AppConfig::try_load(&missing),
        Err(HostError::Io { .. })
    ));
    assert_eq!(AppConfig::load(&missing).playback.frame_interval_ms, 16.0);

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        AppConfig::try_load(&broken),
        Err(HostError::Json(_))
    ));
    assert_eq!(AppConfig::load(&broken).input.min_advance_interval_ms, 150.0);
}

/// 测试从 JSON 文件加载分镜并播放
#[test]
fn test_storyboard_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storyboard.json");
    fs::write(
        &path,
        r#"[
            {
                "title": "独白",
                "camera": { "to": { "x": 0.0, "y": 0.0, "zoom": 1.0 } },
                "advance": "DialogueGated",
                "dialogue": [
                    { "speaker": "悟饭", "text": "……", "hold_ms": 1000.0 }
                ],
                "cues": [ { "at_ms": 500.0, "action": { "Signal": { "name": "sfx_wind" } } } ]
            }
        ]"#,
    )
    .unwrap();

    let mut config = AppConfig::default();
    config.playback.storyboard_path = Some(path);
    let summary = App::from_config(config).unwrap().run();

    assert_eq!(summary.plays_completed, 1);
    assert_eq!(summary.lines_shown, 1);
    assert_eq!(summary.signals, vec!["sfx_wind".to_string()]);
}

/// 测试无效分镜文件在启动时报错
#[test]
fn test_invalid_storyboard_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, "[]").unwrap();

    assert!(matches!(
        storyboard::from_file(&path),
        Err(HostError::Json(_))
    ));
}
