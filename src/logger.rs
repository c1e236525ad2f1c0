// 日志初始化 - 同时输出到控制台和按天轮转的日志文件

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// 日志文件名前缀
const LOG_FILE_NAME: &str = "posture-diagnosis.log";

/// 日志时间格式
const TIMESTAMP_FORMAT: &str =
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]";

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// 日志目录，未设置时使用系统默认位置
    pub dir: Option<PathBuf>,
    /// 日志级别（trace/debug/info/warn/error）
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            level: "info".to_string(),
        }
    }
}

impl LogSettings {
    /// 实际使用的日志目录
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_log_dir)
    }

    pub fn max_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.level).unwrap_or(tracing::Level::INFO)
    }
}

fn default_log_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("Library/Logs/posture-diagnosis")
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join("posture-diagnosis").join("logs")
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share/posture-diagnosis/logs")
    }
}

/// 初始化日志系统
///
/// 返回的 guard 需要在程序生命周期内保持，drop 后文件日志停止写入。
pub fn init(settings: &LogSettings) -> Result<WorkerGuard> {
    let log_dir = settings.resolve_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("创建日志目录失败: {}", log_dir.display()))?;

    // 配置日志输出到文件（每天轮转）
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 结果 JSON 输出到 stdout，日志走 stderr
    let writer = std::io::stderr.and(non_blocking);

    // 使用本地时区
    let format = time::format_description::parse_borrowed::<2>(TIMESTAMP_FORMAT)?;
    let timer = LocalTime::new(format);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(settings.max_level())
        .with_writer(writer)
        .with_timer(timer)
        .with_ansi(cfg!(debug_assertions)) // release 版本不使用颜色代码
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!("日志文件位置: {:?}", log_dir);
    Ok(guard)
}
