//! 配置管理模块
//!
//! 读取宿主 CLI 保存的会话文件（`~/.cf/config.json`），并允许命令行参数覆盖。

use crate::error::{BlameError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// 默认的分页上限
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// 默认的 HTTP 超时
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 插件运行配置
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// API 地址，例如 `https://api.sys.example.com`
    pub api_endpoint: Option<String>,
    /// 访问令牌（不含 `bearer ` 前缀）
    pub access_token: Option<String>,
    /// 是否跳过 TLS 证书校验
    pub skip_ssl_validation: bool,
    /// HTTP 请求超时
    pub request_timeout: Duration,
    /// 分页遍历的最大页数
    pub max_pages: usize,
    /// 是否缓存 space/organization 查询
    pub cache_lookups: bool,
    /// cf 可执行文件路径
    pub cf_binary: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: None,
            access_token: None,
            skip_ssl_validation: false,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: DEFAULT_MAX_PAGES,
            cache_lookups: false,
            cf_binary: "cf".to_string(),
        }
    }
}

/// cf CLI 会话文件中我们关心的字段
#[derive(Debug, Default, Deserialize)]
struct CfSession {
    #[serde(rename = "Target", default)]
    target: String,
    #[serde(rename = "AccessToken", default)]
    access_token: String,
    #[serde(rename = "SSLDisabled", default)]
    ssl_disabled: bool,
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_endpoint: Option<String>,
    pub access_token: Option<String>,
    pub skip_ssl_validation: bool,
    pub request_timeout: Option<Duration>,
    pub max_pages: Option<usize>,
    pub cache_lookups: bool,
    pub cf_binary: Option<String>,
}

impl Config {
    /// cf CLI 会话文件的默认位置：`$CF_HOME/.cf/config.json`，否则 `$HOME/.cf/config.json`
    pub fn default_session_path() -> Option<PathBuf> {
        std::env::var("CF_HOME")
            .or_else(|_| std::env::var("HOME"))
            .ok()
            .map(|home| PathBuf::from(home).join(".cf").join("config.json"))
    }

    /// 从会话文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BlameError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&content)
    }

    /// 从会话文件内容加载配置
    pub fn load_from_str(content: &str) -> Result<Self> {
        let session: CfSession = serde_json::from_str(content)
            .map_err(|e| BlameError::config(format!("Failed to parse cf session: {}", e)))?;

        let access_token = match session.access_token.split_once(' ') {
            Some((_, token)) => token.to_string(),
            None => session.access_token.clone(),
        };

        Ok(Self {
            api_endpoint: non_empty(session.target),
            access_token: non_empty(access_token),
            skip_ssl_validation: session.ssl_disabled,
            ..Default::default()
        })
    }

    /// 加载会话文件（如果存在）并应用覆盖项
    pub fn resolve(session_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let base = match session_path {
            Some(path) if path.exists() => Self::load_from_file(path)?,
            Some(path) => {
                log::debug!("No cf session found at {}", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        let config = base.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// 应用命令行覆盖项
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(api) = overrides.api_endpoint {
            self.api_endpoint = Some(api);
        }
        if let Some(token) = overrides.access_token {
            self.access_token = Some(token);
        }
        if overrides.skip_ssl_validation {
            self.skip_ssl_validation = true;
        }
        if let Some(timeout) = overrides.request_timeout {
            self.request_timeout = timeout;
        }
        if let Some(max_pages) = overrides.max_pages {
            self.max_pages = max_pages;
        }
        if overrides.cache_lookups {
            self.cache_lookups = true;
        }
        if let Some(cf_binary) = overrides.cf_binary {
            self.cf_binary = cf_binary;
        }
        self
    }

    /// 验证配置
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(BlameError::config("max pages must be at least 1"));
        }
        if let Some(api) = &self.api_endpoint {
            Url::parse(api)
                .map_err(|e| BlameError::config(format!("Invalid API endpoint {}: {}", api, e)))?;
        }
        Ok(())
    }

    /// HTTP 传输所需的 API 地址
    pub fn require_api_endpoint(&self) -> Result<&str> {
        self.api_endpoint
            .as_deref()
            .ok_or_else(|| BlameError::config("no API endpoint configured"))
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
