//! # Diego Blame
//!
//! 找出运行在指定 Diego cell 上的全部应用实例，并报告它们的资源占用。
//! 数据来自平台 v2 API：分页获取应用，按主机筛选实例统计，再解析 org/space。

pub mod apps;
pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod logger;
pub mod plugin;
pub mod report;
pub mod stats;
pub mod transport;
pub mod types;
pub mod utils;

// 重新导出主要的公共接口
pub use client::CfClient;
pub use config::{Config, Overrides};
pub use error::{BlameError, Result};
pub use plugin::{DiegoBlame, PluginMetadata, PluginVersion, PLUGIN_NAME};
pub use transport::{CfCurlTransport, HttpTransport, Transport};
pub use types::{AppLocation, AppStat, ReportRow, Stats, Usage};

/// 插件版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化日志系统
///
/// # Examples
///
/// ```
/// diego_blame_rs::init_logger(false);
/// ```
pub fn init_logger(verbose: bool) {
    logger::init_logger(Some(logger::LoggerConfig::verbose(verbose)));
}
