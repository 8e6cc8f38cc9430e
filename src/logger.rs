//! 日志模块
//!
//! 基于 `env_logger` 的日志初始化。日志统一输出到 stderr，
//! 报表独占 stdout。设置了 `RUST_LOG` 时以其为准。

use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};
use std::io::{self, Write};
use std::sync::Once;

static INIT: Once = Once::new();

const RESET: &str = "\x1b[0m";

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 未设置 `RUST_LOG` 时使用的级别
    pub level: LevelFilter,
    /// 日志格式
    pub format: LogFormat,
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `[时:分:秒] 级别 消息`，级别带颜色
    Compact,
    /// `[日期 时间] [级别] [模块] 消息`
    Full,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            format: LogFormat::Compact,
        }
    }
}

impl LoggerConfig {
    /// 根据 verbose 开关生成配置
    pub fn verbose(verbose: bool) -> Self {
        if verbose {
            Self {
                level: LevelFilter::Debug,
                format: LogFormat::Full,
            }
        } else {
            Self::default()
        }
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[36m",
        Level::Trace => "\x1b[37m",
    }
}

fn write_record(buf: &mut Formatter, record: &Record, format: LogFormat) -> io::Result<()> {
    match format {
        LogFormat::Compact => writeln!(
            buf,
            "[{}] {}{:5}{} {}",
            chrono::Local::now().format("%H:%M:%S"),
            level_color(record.level()),
            record.level(),
            RESET,
            record.args()
        ),
        LogFormat::Full => writeln!(
            buf,
            "[{}] [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("-"),
            record.args()
        ),
    }
}

/// 设置过滤级别；`env_filters` 中的指令覆盖默认级别
fn apply_filters(builder: &mut env_logger::Builder, level: LevelFilter, env_filters: Option<&str>) {
    builder.filter_level(level);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
}

/// 初始化日志系统，重复调用无副作用
///
/// # Examples
///
/// ```
/// use diego_blame_rs::logger::{init_logger, LoggerConfig};
///
/// init_logger(Some(LoggerConfig::verbose(true)));
/// ```
pub fn init_logger(config: Option<LoggerConfig>) {
    INIT.call_once(|| {
        let config = config.unwrap_or_default();
        let env_filters = std::env::var("RUST_LOG").ok();

        let mut builder = env_logger::Builder::new();
        apply_filters(&mut builder, config.level, env_filters.as_deref());

        let format = config.format;
        builder
            .target(env_logger::Target::Stderr)
            .format(move |buf, record| write_record(buf, record, format));

        // 测试中可能已有其他 logger
        let _ = builder.try_init();
    });
}
