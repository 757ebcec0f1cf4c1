//! 内容服务的日志初始化
//!
//! 控制台输出与按天滚动的文件输出，并可在后台清理旧日志文件。

use log::error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::ParseError,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "lingua.log";
const DEFAULT_LEVEL: &str = "info";
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// 日志初始化错误
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    #[error("Global subscriber already set: {0}")]
    AlreadyInit(#[from] TryInitError),
}

/// 日志配置构建器
pub struct LoggerConfig {
    /// 日志文件前缀，滚动后的文件名形如 lingua.log.2024-01-01
    file_prefix: String,
    log_dir: PathBuf,
    /// chrono 时间格式
    time_format: String,
    /// 默认级别，没有过滤指令时使用
    level: String,
    /// 过滤指令，例如 "lingua_core=debug,info"
    filter: Option<String>,
    console: bool,
    file: bool,
    /// 保留的日志文件数量
    max_files: Option<usize>,
    cleanup_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            filter: None,
            console: true,
            file: true,
            max_files: None,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// 设置时间戳格式，参考 chrono::format::strftime
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// 设置过滤指令，优先级高于 `RUST_LOG` 与 `level`
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    /// 超过此数量的旧日志文件将被删除
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }

    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// 初始化日志系统，失败时打印到 stderr
    ///
    /// 返回的 `WorkerGuard` 必须被持有，否则文件日志可能丢失。
    pub fn init(self) -> Option<WorkerGuard> {
        match self.try_init() {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Failed to init logger: {}", e);
                None
            }
        }
    }

    /// 初始化日志系统
    ///
    /// 注册全局 subscriber；配置了 `max_files` 时同时启动清理线程。
    pub fn try_init(self) -> Result<Option<WorkerGuard>, LoggerError> {
        let filter = self.env_filter()?;
        let console_layer = self.console_layer();
        let (file_layer, guard) = self.file_layer();

        Registry::default()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        self.spawn_cleanup();
        Ok(guard)
    }

    /// 过滤指令优先，其次 `RUST_LOG`，最后是 `level`
    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        if let Some(directives) = &self.filter {
            return Ok(EnvFilter::try_new(directives)?);
        }
        Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))?)
    }

    fn console_layer<S>(&self) -> Option<impl Layer<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
        })
    }

    fn file_layer<S>(&self) -> (Option<impl Layer<S>>, Option<WorkerGuard>)
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.file {
            return (None, None);
        }

        let appender = tracing_appender::rolling::daily(&self.log_dir, &self.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(self.time_format.clone()))
            .with_ansi(false)
            .with_writer(writer);

        (Some(layer), Some(guard))
    }

    fn spawn_cleanup(&self) {
        let Some(keep) = self.max_files else {
            return;
        };
        if !self.file {
            return;
        }

        let log_dir = self.log_dir.clone();
        let file_prefix = self.file_prefix.clone();
        let interval = self.cleanup_interval;
        std::thread::spawn(move || {
            loop {
                prune_logs(&log_dir, &file_prefix, keep);
                std::thread::sleep(interval);
            }
        });
    }
}

/// 保留最新的 `keep` 个日志文件，返回删除的数量
///
/// 依赖滚动文件名的日期后缀（如 .2024-01-01）按字典序即时间序排列。
pub fn prune_logs(log_dir: &Path, file_prefix: &str, keep: usize) -> usize {
    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            if log_dir.exists() {
                error!("Failed to read log directory {}: {}", log_dir.display(), e);
            }
            return 0;
        }
    };

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            name.starts_with(file_prefix).then(|| (name, entry.path()))
        })
        .collect();

    // 新文件在前
    files.sort_by(|a, b| b.0.cmp(&a.0));

    files
        .iter()
        .skip(keep)
        .filter(|(_, path)| {
            std::fs::remove_file(path)
                .inspect_err(|e| error!("Failed to remove old log file {}: {}", path.display(), e))
                .is_ok()
        })
        .count()
}
