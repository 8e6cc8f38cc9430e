//! 类型定义模块
//!
//! 平台 v2 API 的响应结构以及报表中间数据。

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// 资源元数据
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub url: String,
}

/// 通用资源包装：`{ "metadata": ..., "entity": ... }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource<E> {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub entity: E,
}

/// 应用实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub space_url: String,
}

/// Space 实体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpaceEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub organization_url: String,
}

/// 只关心名称的实体（organization）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedEntity {
    #[serde(default)]
    pub name: String,
}

pub type AppResource = Resource<AppEntity>;
pub type SpaceResource = Resource<SpaceEntity>;
pub type OrganizationResource = Resource<NamedEntity>;

/// `/v2/apps` 的分页结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsPage {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub resources: Vec<AppResource>,
}

/// 平台返回的错误体
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: String,
    pub error_code: String,
}

/// `null` 与缺失字段一样按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 实例资源使用快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub disk: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mem: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu: f64,
    /// 采样时间，保留平台原始格式
    #[serde(default)]
    pub time: Option<String>,
}

/// 实例运行统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uris: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub uptime: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mem_quota: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disk_quota: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fds_quota: u64,
}

/// `/v2/apps/{guid}/stats` 中单个实例的原始结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    /// DOWN 状态的实例可能没有 stats
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Stats,
}

/// 实例索引到统计的映射
pub type AppStatsResponse = HashMap<String, InstanceStats>;

/// 某个应用在目标主机上的一个实例
#[derive(Debug, Clone, Serialize)]
pub struct AppStat {
    pub app_guid: String,
    /// 平台返回时使用的键，仅用于展示
    pub instance_index: String,
    pub state: String,
    pub stats: Stats,
}

impl AppStat {
    /// `<app-name>/<instance-index>`
    pub fn label(&self) -> String {
        format!("{}/{}", self.stats.name, self.instance_index)
    }

    /// `<host>:<port>`
    pub fn host_port(&self) -> String {
        format!("{}:{}", self.stats.host, self.stats.port)
    }
}

/// 应用所在的 organization/space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppLocation {
    pub org: String,
    pub space: String,
}

/// 报表中的一行
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub stat: AppStat,
    pub location: AppLocation,
}
