//! 传输层模块
//!
//! 向平台 API 发起已认证的 GET 请求，返回原始输出行。
//! 认证由宿主 CLI（`cf curl`）或其保存的会话令牌负责。

use crate::config::Config;
use crate::error::{BlameError, Result};
use crate::utils::url_utils::{resolve_api_url, validate_url};
use reqwest::Client;
use tokio::process::Command;
use url::Url;

/// 平台 API 的传输通道
///
/// 返回值按行拆分，调用方负责拼接后再解析。
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// 对给定路径（相对或绝对）发起 GET 请求
    async fn get(&self, path: &str) -> Result<Vec<String>>;
}

/// 通过宿主 CLI 的 `cf curl` 访问 API
#[derive(Debug, Clone)]
pub struct CfCurlTransport {
    cf_binary: String,
}

impl CfCurlTransport {
    pub fn new<S: Into<String>>(cf_binary: S) -> Self {
        Self {
            cf_binary: cf_binary.into(),
        }
    }
}

impl Default for CfCurlTransport {
    fn default() -> Self {
        Self::new("cf")
    }
}

impl Transport for CfCurlTransport {
    async fn get(&self, path: &str) -> Result<Vec<String>> {
        log::debug!("{} curl {}", self.cf_binary, path);

        let output = Command::new(&self.cf_binary)
            .arg("curl")
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                BlameError::transport(format!("failed to run {} curl: {}", self.cf_binary, e))
            })?;

        if !output.status.success() {
            return Err(BlameError::transport(format!(
                "{} curl {} exited with {}: {}",
                self.cf_binary,
                path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(String::from)
            .collect())
    }
}

/// 直接通过 HTTP 访问 API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpTransport {
    /// 创建 HTTP 传输
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::transport::HttpTransport;
    ///
    /// let transport = HttpTransport::new("https://api.sys.example.com", None);
    /// assert!(transport.is_ok());
    /// ```
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        Self::build(base_url, token, &Config::default())
    }

    /// 根据配置创建 HTTP 传输
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.require_api_endpoint()?;
        Self::build(base_url, config.access_token.clone(), config)
    }

    fn build(base_url: &str, token: Option<String>, config: &Config) -> Result<Self> {
        let base_url = validate_url(base_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .build()
            .map_err(|e| BlameError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// 构建完整的 API URL
    fn build_url(&self, path: &str) -> Result<Url> {
        resolve_api_url(&self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<String>> {
        let url = self.build_url(path)?;
        log::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BlameError::network(format!("HTTP request to {} failed: {}", path, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BlameError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(BlameError::network(format!(
                "API request {} failed: {} - {}",
                path, status, text
            )));
        }

        Ok(text.lines().map(String::from).collect())
    }
}
