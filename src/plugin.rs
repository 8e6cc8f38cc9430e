//! 插件入口
//!
//! 提供插件元数据以及 `diego-blame` 命令的完整执行流程：
//! 分页收集应用 → 按主机筛选实例 → 解析位置 → 渲染报表。

use crate::apps::collect_app_guids;
use crate::client::{CfClient, APPS_ENDPOINT};
use crate::config::Config;
use crate::error::{BlameError, Result};
use crate::location::LocationResolver;
use crate::report;
use crate::stats::collect_stats;
use crate::transport::Transport;
use crate::types::ReportRow;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// 插件与命令名称
pub const PLUGIN_NAME: &str = "diego-blame";

/// 命令帮助文本
pub const HELP_TEXT: &str = "Run a scan to find all apps on a given diego cell in order to identify utilization spike causes";

/// 插件版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
}

impl FromStr for PluginVersion {
    type Err = BlameError;

    /// 解析 `1.2.3` 或 `v1.2.3`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = trimmed.split('.').collect();
        if parts.len() != 3 {
            return Err(BlameError::invalid_parameter(format!(
                "version {} is not in major.minor.build form",
                s
            )));
        }

        let parse = |part: &str| {
            part.parse::<u32>().map_err(|e| {
                BlameError::invalid_parameter(format!("invalid version component {}: {}", part, e))
            })
        };

        Ok(Self {
            major: parse(parts[0])?,
            minor: parse(parts[1])?,
            build: parse(parts[2])?,
        })
    }
}

/// 命令用法
#[derive(Debug, Clone, Serialize)]
pub struct CommandUsage {
    pub usage: String,
}

/// 插件提供的命令
#[derive(Debug, Clone, Serialize)]
pub struct PluginCommand {
    pub name: String,
    pub help_text: String,
    pub usage_details: CommandUsage,
}

/// 向宿主 CLI 注册时使用的元数据
#[derive(Debug, Clone, Serialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: PluginVersion,
    pub commands: Vec<PluginCommand>,
}

/// diego-blame 插件
#[derive(Debug, Clone)]
pub struct DiegoBlame {
    version: String,
    config: Config,
}

impl DiegoBlame {
    /// 创建插件实例
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::plugin::DiegoBlame;
    ///
    /// let plugin = DiegoBlame::new("v1.0.0");
    /// assert_eq!(plugin.metadata().unwrap().version.major, 1);
    /// ```
    pub fn new<S: Into<String>>(version: S) -> Self {
        Self {
            version: version.into(),
            config: Config::default(),
        }
    }

    /// 使用指定配置
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 插件元数据
    pub fn metadata(&self) -> Result<PluginMetadata> {
        Ok(PluginMetadata {
            name: PLUGIN_NAME.to_string(),
            version: self.version.parse()?,
            commands: vec![PluginCommand {
                name: PLUGIN_NAME.to_string(),
                help_text: HELP_TEXT.to_string(),
                usage_details: CommandUsage {
                    usage: format!("cf {} 1.2.3.4", PLUGIN_NAME),
                },
            }],
        })
    }

    /// 从命令参数中取出主机筛选条件
    ///
    /// `args[0]` 为命令名，`args[1]` 为主机；其他参数个数均为用法错误。
    pub fn host_selector(args: &[String]) -> Result<&str> {
        match args {
            [_, host] => Ok(host.as_str()),
            _ => Err(BlameError::usage(format!("{:?}", args))),
        }
    }

    /// 收集目标主机上的全部实例及其位置
    pub async fn collect<T: Transport>(
        &self,
        client: &CfClient<T>,
        host_selector: &str,
    ) -> Vec<ReportRow> {
        let guids = collect_app_guids(client, APPS_ENDPOINT, self.config.max_pages).await;
        log::info!("found {} apps, scanning for host {}", guids.len(), host_selector);

        let mut stats = Vec::new();
        for guid in &guids {
            stats.extend(collect_stats(client, guid, host_selector).await);
        }
        log::info!("{} instances running on {}", stats.len(), host_selector);

        let mut resolver = if self.config.cache_lookups {
            LocationResolver::with_cache(client)
        } else {
            LocationResolver::new(client)
        };

        let mut rows = Vec::with_capacity(stats.len());
        for stat in stats {
            let location = resolver.resolve(&stat.app_guid).await;
            rows.push(ReportRow { stat, location });
        }
        rows
    }

    /// 执行 `diego-blame` 命令，把报表写入 `out`
    ///
    /// 参数校验在任何网络请求之前完成。返回渲染的行数。
    pub async fn run<T, W>(&self, client: &CfClient<T>, args: &[String], out: &mut W) -> Result<usize>
    where
        T: Transport,
        W: Write + ?Sized,
    {
        let host_selector = Self::host_selector(args)?;

        let rows = self.collect(client, host_selector).await;
        report::render(&rows, out)?;
        Ok(rows.len())
    }
}
