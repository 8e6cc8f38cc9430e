//! 客户端模块
//!
//! 在传输层之上完成响应拼接与类型化解析。

use crate::error::{BlameError, Result};
use crate::transport::Transport;
use crate::types::*;
use serde::de::DeserializeOwned;

/// 应用列表的起始地址
pub const APPS_ENDPOINT: &str = "/v2/apps";

/// 应用详情路径
pub fn app_path(guid: &str) -> String {
    format!("/v2/apps/{}", guid)
}

/// 应用实例统计路径
pub fn stats_path(guid: &str) -> String {
    format!("/v2/apps/{}/stats", guid)
}

/// 平台 API 客户端
#[derive(Debug, Clone)]
pub struct CfClient<T> {
    transport: T,
}

impl<T: Transport> CfClient<T> {
    /// 创建新的客户端实例
    ///
    /// # Examples
    ///
    /// ```
    /// use diego_blame_rs::client::CfClient;
    /// use diego_blame_rs::transport::CfCurlTransport;
    ///
    /// let client = CfClient::new(CfCurlTransport::default());
    /// ```
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// 底层传输
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 发送 GET 请求并解析为目标类型
    pub async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        log::debug!("calling: {}", path);
        let lines = self.transport.get(path).await?;
        decode_body(path, &lines.join("\n"))
    }

    /// 获取一页应用列表
    pub async fn apps_page(&self, path: &str) -> Result<AppsPage> {
        self.get(path).await
    }

    /// 获取应用详情
    pub async fn app(&self, guid: &str) -> Result<AppResource> {
        self.get(&app_path(guid)).await
    }

    /// 获取应用各实例的运行统计
    pub async fn app_stats(&self, guid: &str) -> Result<AppStatsResponse> {
        self.get(&stats_path(guid)).await
    }

    /// 获取 space 详情
    pub async fn space(&self, space_url: &str) -> Result<SpaceResource> {
        self.get(space_url).await
    }

    /// 获取 organization 详情
    pub async fn organization(&self, org_url: &str) -> Result<OrganizationResource> {
        self.get(org_url).await
    }
}

/// 解析响应体；平台错误体转换为 [`BlameError::Api`]
pub fn decode_body<R>(path: &str, body: &str) -> Result<R>
where
    R: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Err(BlameError::network(format!("empty response from {}", path)));
    }

    if let Ok(error) = serde_json::from_str::<ApiErrorBody>(body) {
        return Err(BlameError::api(error.error_code, error.description));
    }

    serde_json::from_str(body).map_err(BlameError::Json)
}
