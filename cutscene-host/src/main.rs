//! Cutscene Host - 无头播放器
//!
//! 加载配置与分镜，驱动 cutscene-runtime 播放并把画面输出到日志。

use std::process::ExitCode;

use cutscene_host::{App, AppConfig, logging};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let path = AppConfig::resolve_path();
    let (config, load_error) = match AppConfig::try_load(&path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match load_error {
        None => info!(path = ?path, "配置文件加载成功"),
        Some(e) => warn!(path = ?path, error = %e, "配置文件加载失败，使用默认配置"),
    }

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "初始化失败");
            return ExitCode::FAILURE;
        }
    };

    let summary = app.run();
    if summary.hit_frame_limit {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
